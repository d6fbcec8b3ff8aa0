//! Win32 backing for the chrome: a borderless layered host window, a GDI
//! painter and the thread mouse hook that feeds the global mouse filter.

mod gdi;
pub mod hook;
mod window;

pub use gdi::GdiPainter;
pub use hook::ThreadMouseHook;
pub use window::{ChromeWindow, Win32Host};
