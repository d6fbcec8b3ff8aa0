pub mod animation;
pub mod buttons;
pub mod color;
pub mod controller;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod logging;
pub mod message;
pub mod mouse_filter;
pub mod paint;
pub mod settings;

#[cfg(windows)]
pub mod win32;

pub use controller::{ChromeController, MessageOutcome};
pub use host::{BeforeClosingEvent, HostWindow, WindowState};
pub use settings::ChromeSettings;
