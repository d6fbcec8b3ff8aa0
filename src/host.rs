//! The capabilities the chrome needs from the window it decorates.

use crate::geometry::{Point, Rect, Size};
use crate::hit_test::{CursorShape, HitTestCode};
use crate::mouse_filter::MouseWaker;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// Raised before a close requested from the caption button. Setting
/// `cancel` keeps the window open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BeforeClosingEvent {
    pub cancel: bool,
}

/// A native call that can enter a modal loop (move, size, popup menu).
///
/// Hosts that guard their state with borrows must not run these while the
/// chrome is still handling a message, or every message sent from inside the
/// loop would find that state busy. They queue the request instead and run it
/// once the handler has returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeRequest {
    NonclientDrag(HitTestCode),
    SystemCommand { command: u32, lparam: isize },
    /// Show the system menu at a screen point and forward the chosen entry
    /// as a system command.
    SystemMenu(Point),
}

#[derive(Debug, Default)]
pub struct NativeRequestQueue {
    pending: VecDeque<NativeRequest>,
}

impl NativeRequestQueue {
    pub fn push(&mut self, request: NativeRequest) {
        tracing::trace!(?request, "native request queued");
        self.pending.push_back(request);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Everything queued so far, oldest first.
    pub fn take(&mut self) -> Vec<NativeRequest> {
        self.pending.drain(..).collect()
    }
}

/// A native window as seen by [`crate::controller::ChromeController`].
///
/// Implementations wrap the platform window; every method is called on the
/// UI thread. Queries that fail natively should answer with a neutral value
/// (for example `false` for [`HostWindow::composition_enabled`]) rather than
/// panic.
pub trait HostWindow {
    /// Design surfaces and other contexts where the chrome must stay passive.
    fn is_inert(&self) -> bool {
        false
    }
    fn is_disposed(&self) -> bool;
    fn is_visible(&self) -> bool;
    fn title(&self) -> String;
    /// Horizontal pixels per inch of the display showing the window.
    fn dpi(&self) -> u32;

    fn client_size(&self) -> Size;
    /// Outer bounds in screen coordinates.
    fn bounds(&self) -> Rect;
    fn set_location(&mut self, location: Point);
    fn set_bounds(&mut self, bounds: Rect);
    fn window_state(&self) -> WindowState;
    fn set_window_state(&mut self, state: WindowState);
    fn set_minimum_size(&mut self, size: Size);
    fn set_maximum_size(&mut self, size: Size);
    /// Usable area of the window's display, without taskbars.
    fn work_area(&self) -> Rect;
    /// Toggle the native sizing frame style, returning the previous setting.
    fn set_resizable_frame(&mut self, enabled: bool) -> bool;

    /// Cursor position in screen coordinates.
    fn cursor_position(&self) -> Point;
    fn screen_to_client(&self, point: Point) -> Point;
    fn cursor(&self) -> CursorShape;
    fn set_cursor(&mut self, cursor: CursorShape);
    fn release_capture(&mut self);

    /// Hand a left-button press to the window manager as if it happened on
    /// the non-client part `code`; the platform then runs its move or size loop.
    fn begin_nonclient_drag(&mut self, code: HitTestCode);
    fn send_system_command(&mut self, command: u32, lparam: isize);
    /// Show the native system menu at a screen point and return the chosen id.
    /// A host that defers the menu (see [`NativeRequest::SystemMenu`]) returns
    /// `None` and forwards the choice itself.
    fn show_system_menu(&mut self, at: Point) -> Option<u32>;

    fn composition_enabled(&self) -> bool;
    /// Extend the frame a little into the client area so the compositor draws a shadow.
    fn extend_frame_shadow(&mut self);
    /// Class-level drop shadow for when composition is unavailable.
    fn apply_drop_shadow_fallback(&mut self);

    fn opacity(&self) -> f64;
    fn set_opacity(&mut self, opacity: f64);
    /// Deliver [`crate::message::WindowMessage::Timer`] every `interval`.
    fn start_timer(&mut self, interval: Duration);
    fn stop_timer(&mut self);
    fn invalidate(&mut self);
    fn close(&mut self);

    /// Callback the global mouse filter runs after queueing an event for this
    /// window, so the host can schedule [`crate::ChromeController::on_global_mouse`]
    /// even when the pointer is over a child and the window itself gets no
    /// mouse messages.
    fn global_mouse_waker(&self) -> Option<MouseWaker> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_requests_come_back_in_order() {
        let mut queue = NativeRequestQueue::default();
        queue.push(NativeRequest::NonclientDrag(HitTestCode::Left));
        queue.push(NativeRequest::SystemCommand {
            command: 0xF001,
            lparam: 7,
        });
        queue.push(NativeRequest::SystemMenu(Point::new(10, 20)));

        assert_eq!(
            queue.take(),
            vec![
                NativeRequest::NonclientDrag(HitTestCode::Left),
                NativeRequest::SystemCommand {
                    command: 0xF001,
                    lparam: 7
                },
                NativeRequest::SystemMenu(Point::new(10, 20)),
            ]
        );
        assert!(queue.is_empty());
        assert!(queue.take().is_empty());
    }
}
