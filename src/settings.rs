use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration surface of a chrome window.
///
/// All lengths are logical pixels at 96 DPI; the layout scales them to the
/// display when the window loads.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChromeSettings {
    /// Height of the owner-drawn title bar.
    #[serde(default = "default_title_bar_height")]
    pub title_bar_height: i32,
    /// Width of the border painted around the window.
    #[serde(default = "default_border_width")]
    pub border_width: i32,
    /// Distance from each edge in which the pointer arms a resize.
    #[serde(default = "default_resize_border_width")]
    pub resize_border_width: i32,
    /// Left inset of the title text.
    #[serde(default = "default_title_padding")]
    pub title_padding: i32,
    #[serde(default = "default_title_bar_color")]
    pub title_bar_color: Color,
    #[serde(default = "default_border_color")]
    pub border_color: Color,
    #[serde(default = "default_backdrop_color")]
    pub backdrop_color: Color,
    /// Duration of the fade-in when the window opens, in milliseconds.
    #[serde(default = "default_fade_in_ms")]
    pub fade_in_ms: u64,
    /// Duration of the fade-out when the window closes, in milliseconds.
    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,
    #[serde(default = "default_true")]
    pub resizable: bool,
    #[serde(default = "default_true")]
    pub minimize_box: bool,
    #[serde(default = "default_true")]
    pub maximize_box: bool,
    /// When false no caption buttons are drawn at all.
    #[serde(default = "default_true")]
    pub control_box: bool,
    /// When enabled the logger is initialised at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file that receives log output instead of stdout.
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_title_bar_height() -> i32 {
    28
}

fn default_border_width() -> i32 {
    2
}

fn default_resize_border_width() -> i32 {
    5
}

fn default_title_padding() -> i32 {
    14
}

fn default_title_bar_color() -> Color {
    Color::DARK_SLATE_GRAY
}

fn default_border_color() -> Color {
    Color::DARK_SLATE_GRAY
}

fn default_backdrop_color() -> Color {
    Color::SNOW
}

fn default_fade_in_ms() -> u64 {
    250
}

fn default_fade_out_ms() -> u64 {
    200
}

fn default_true() -> bool {
    true
}

impl Default for ChromeSettings {
    fn default() -> Self {
        Self {
            title_bar_height: default_title_bar_height(),
            border_width: default_border_width(),
            resize_border_width: default_resize_border_width(),
            title_padding: default_title_padding(),
            title_bar_color: default_title_bar_color(),
            border_color: default_border_color(),
            backdrop_color: default_backdrop_color(),
            fade_in_ms: default_fade_in_ms(),
            fade_out_ms: default_fade_out_ms(),
            resizable: true,
            minimize_box: true,
            maximize_box: true,
            control_box: true,
            debug_logging: false,
            log_file: None,
        }
    }
}

impl ChromeSettings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    /// Minimize button is shown only while the control box is.
    pub fn shows_minimize(&self) -> bool {
        self.control_box && self.minimize_box
    }

    pub fn shows_maximize(&self) -> bool {
        self.control_box && self.maximize_box
    }

    pub fn shows_close(&self) -> bool {
        self.control_box
    }
}
