//! DPI-scaled geometry of the title bar and its caption buttons.

use crate::buttons::ChromeButton;
use crate::geometry::{DpiScale, Point, Rect, Size};
use crate::settings::ChromeSettings;

/// Caption buttons are this much wider than the title bar is tall.
const BUTTON_ASPECT: f32 = 1.5;

/// Rectangles of the caption buttons that are actually shown.
///
/// Slots are filled right-to-left starting at the window's right edge in the
/// order close, maximize, minimize; a hidden button takes no slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSlots {
    pub minimize: Option<Rect>,
    pub maximize: Option<Rect>,
    pub close: Option<Rect>,
}

impl ButtonSlots {
    fn compute(settings: &ChromeSettings, width: i32, button_width: i32, height: i32) -> Self {
        let mut next = 1;
        let mut take = |shown: bool| {
            if !shown {
                return None;
            }
            let rect = Rect::new(width - next * button_width, 0, button_width, height);
            next += 1;
            Some(rect)
        };
        let close = take(settings.shows_close());
        let maximize = take(settings.shows_maximize());
        let minimize = take(settings.shows_minimize());
        Self {
            minimize,
            maximize,
            close,
        }
    }

    pub fn get(&self, button: ChromeButton) -> Option<Rect> {
        match button {
            ChromeButton::Minimize => self.minimize,
            ChromeButton::Maximize => self.maximize,
            ChromeButton::Close => self.close,
        }
    }

    pub fn occupied(&self) -> usize {
        [self.minimize, self.maximize, self.close]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// First button whose slot contains `point`, tested minimize, maximize, close.
    pub fn button_at(&self, point: Point) -> Option<ChromeButton> {
        ChromeButton::ALL
            .into_iter()
            .find(|button| self.get(*button).is_some_and(|rect| rect.contains(point)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChromeLayout {
    scale: DpiScale,
    title_bar_height: i32,
    border_width: i32,
    button_width: i32,
    resize_border: i32,
    title_padding: f32,
    window_size: Size,
    title_bar: Rect,
    slots: ButtonSlots,
}

impl ChromeLayout {
    /// Scale the logical metrics in `settings`. Rectangles stay empty until
    /// [`ChromeLayout::resize`] provides the window size.
    pub fn new(settings: &ChromeSettings, scale: DpiScale) -> Self {
        let title_bar_height = scale.scale(settings.title_bar_height);
        Self {
            scale,
            title_bar_height,
            border_width: scale.scale(settings.border_width),
            button_width: (title_bar_height as f32 * BUTTON_ASPECT) as i32,
            resize_border: scale.scale(settings.resize_border_width),
            title_padding: scale.scale_f(settings.title_padding as f32),
            window_size: Size::default(),
            title_bar: Rect::default(),
            slots: ButtonSlots::default(),
        }
    }

    pub fn resize(&mut self, settings: &ChromeSettings, size: Size) {
        self.window_size = size;
        self.title_bar = Rect::new(0, 0, size.width, self.title_bar_height);
        self.slots = ButtonSlots::compute(
            settings,
            size.width,
            self.button_width,
            self.title_bar_height,
        );
    }

    pub fn scale(&self) -> DpiScale {
        self.scale
    }

    pub fn title_bar_height(&self) -> i32 {
        self.title_bar_height
    }

    pub fn border_width(&self) -> i32 {
        self.border_width
    }

    pub fn button_width(&self) -> i32 {
        self.button_width
    }

    pub fn resize_border(&self) -> i32 {
        self.resize_border
    }

    pub fn title_padding(&self) -> f32 {
        self.title_padding
    }

    pub fn window_size(&self) -> Size {
        self.window_size
    }

    pub fn title_bar(&self) -> Rect {
        self.title_bar
    }

    pub fn slots(&self) -> &ButtonSlots {
        &self.slots
    }

    pub fn button_bounds(&self, button: ChromeButton) -> Option<Rect> {
        self.slots.get(button)
    }

    /// Window area below the title bar.
    pub fn user_area(&self) -> Rect {
        Rect::new(
            0,
            self.title_bar_height,
            self.window_size.width,
            self.window_size.height - self.title_bar_height,
        )
    }

    pub fn button_cluster_width(&self) -> i32 {
        self.button_width * self.slots.occupied() as i32
    }

    /// Smallest size that still fits every shown caption button.
    pub fn minimum_size(&self) -> Size {
        let slots = self.slots.occupied().max(1) as i32;
        Size::new(self.button_width * slots, self.title_bar_height)
    }

    pub fn in_title_bar(&self, point: Point) -> bool {
        self.title_bar.contains(point)
    }

    /// Title-bar point that is not covered by a caption button.
    pub fn is_caption(&self, point: Point) -> bool {
        self.in_title_bar(point) && self.slots.button_at(point).is_none()
    }
}
