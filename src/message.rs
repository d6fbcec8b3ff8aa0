//! Decoding of the window messages the chrome reacts to.

use crate::geometry::{Point, Size};

pub const WM_CREATE: u32 = 0x0001;
pub const WM_SIZE: u32 = 0x0005;
pub const WM_ACTIVATE: u32 = 0x0006;
pub const WM_PAINT: u32 = 0x000F;
pub const WM_NCPAINT: u32 = 0x0085;
pub const WM_NCLBUTTONDOWN: u32 = 0x00A1;
pub const WM_SYSCOMMAND: u32 = 0x0112;
pub const WM_TIMER: u32 = 0x0113;
pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_LBUTTONDBLCLK: u32 = 0x0203;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_MOUSELEAVE: u32 = 0x02A3;

/// An undecoded message as delivered to a window procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMessage {
    pub code: u32,
    pub wparam: usize,
    pub lparam: isize,
}

impl RawMessage {
    pub const fn new(code: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            code,
            wparam,
            lparam,
        }
    }

    /// Signed client coordinates packed in the low/high words of `lparam`.
    pub fn point(&self) -> Point {
        Point::new(
            (self.lparam & 0xffff) as i16 as i32,
            ((self.lparam >> 16) & 0xffff) as i16 as i32,
        )
    }

    pub fn size(&self) -> Size {
        Size::new(
            (self.lparam & 0xffff) as u16 as i32,
            ((self.lparam >> 16) & 0xffff) as u16 as i32,
        )
    }
}

/// Pack a point the way mouse messages carry it.
pub fn pack_point(point: Point) -> isize {
    ((point.x as u16 as u32) | ((point.y as u16 as u32) << 16)) as i32 as isize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMessage {
    /// The window is about to be shown for the first time.
    Load,
    Resized(Size),
    Activated(bool),
    MouseMove(Point),
    ButtonDown { button: MouseButton, point: Point },
    ButtonUp { button: MouseButton, point: Point },
    DoubleClick { button: MouseButton, point: Point },
    MouseLeave,
    /// Left button pressed over a non-client part; `hit_test` is the raw code.
    NcLeftButtonDown { hit_test: u32, lparam: isize },
    NcPaint,
    Timer(usize),
}

impl WindowMessage {
    /// Messages the chrome does not care about decode to `None`.
    /// `Load` is never produced here; the host raises it itself.
    pub fn decode(raw: &RawMessage) -> Option<Self> {
        let message = match raw.code {
            WM_SIZE => Self::Resized(raw.size()),
            WM_ACTIVATE => Self::Activated(raw.wparam & 0xffff != 0),
            WM_MOUSEMOVE => Self::MouseMove(raw.point()),
            WM_LBUTTONDOWN => Self::ButtonDown {
                button: MouseButton::Left,
                point: raw.point(),
            },
            WM_LBUTTONUP => Self::ButtonUp {
                button: MouseButton::Left,
                point: raw.point(),
            },
            WM_LBUTTONDBLCLK => Self::DoubleClick {
                button: MouseButton::Left,
                point: raw.point(),
            },
            WM_RBUTTONDOWN => Self::ButtonDown {
                button: MouseButton::Right,
                point: raw.point(),
            },
            WM_RBUTTONUP => Self::ButtonUp {
                button: MouseButton::Right,
                point: raw.point(),
            },
            WM_MOUSELEAVE => Self::MouseLeave,
            WM_NCLBUTTONDOWN => Self::NcLeftButtonDown {
                hit_test: raw.wparam as u32,
                lparam: raw.lparam,
            },
            WM_NCPAINT => Self::NcPaint,
            WM_TIMER => Self::Timer(raw.wparam),
            _ => return None,
        };
        Some(message)
    }
}
