#![allow(dead_code)]

use custom_chrome::controller::{ChromeController, MessageOutcome};
use custom_chrome::geometry::{Point, Rect, Size};
use custom_chrome::hit_test::{CursorShape, HitTestCode};
use custom_chrome::host::{HostWindow, WindowState};
use custom_chrome::message::{MouseButton, WindowMessage};
use custom_chrome::mouse_filter::MouseWaker;
use custom_chrome::settings::ChromeSettings;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SetLocation(Point),
    SetBounds(Rect),
    SetWindowState(WindowState),
    SetMinimumSize(Size),
    SetMaximumSize(Size),
    SetResizableFrame(bool),
    SetCursor(CursorShape),
    ReleaseCapture,
    BeginNonclientDrag(HitTestCode),
    SystemCommand(u32, isize),
    ShowSystemMenu(Point),
    ExtendFrameShadow,
    DropShadowFallback,
    SetOpacity(f64),
    StartTimer(Duration),
    StopTimer,
    Invalidate,
    Close,
}

/// Window stand-in that records every mutating call.
pub struct MockHost {
    pub calls: Vec<HostCall>,
    pub inert: bool,
    pub disposed: bool,
    pub visible: bool,
    pub title: String,
    pub dpi: u32,
    /// Outer bounds in screen coordinates; the client area is the same size.
    pub bounds: Rect,
    pub state: WindowState,
    pub work_area: Rect,
    pub maximum_size: Option<Size>,
    pub resizable_frame: bool,
    pub cursor_position: Point,
    pub cursor: CursorShape,
    pub composition: bool,
    pub menu_choice: Option<u32>,
    pub opacity: f64,
    pub timer: Option<Duration>,
    /// Times the global mouse filter woke this window.
    pub wakes: Arc<AtomicUsize>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            inert: false,
            disposed: false,
            visible: true,
            title: "Demo".into(),
            dpi: 96,
            bounds: Rect::new(100, 100, 400, 300),
            state: WindowState::Normal,
            work_area: Rect::new(0, 0, 1920, 1040),
            maximum_size: None,
            resizable_frame: false,
            cursor_position: Point::default(),
            cursor: CursorShape::Default,
            composition: true,
            menu_choice: None,
            opacity: 1.0,
            timer: None,
            wakes: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockHost {
    pub fn count(&self, call: &HostCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn wake_count(&self) -> usize {
        self.wakes.load(Ordering::SeqCst)
    }

    pub fn has(&self, call: &HostCall) -> bool {
        self.count(call) > 0
    }

    pub fn opacities(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::SetOpacity(o) => Some(*o),
                _ => None,
            })
            .collect()
    }

    /// Put the cursor over a client point.
    pub fn point_at(&mut self, client: Point) {
        self.cursor_position = Point::new(self.bounds.x + client.x, self.bounds.y + client.y);
    }
}

impl HostWindow for MockHost {
    fn is_inert(&self) -> bool {
        self.inert
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn dpi(&self) -> u32 {
        self.dpi
    }

    fn client_size(&self) -> Size {
        self.bounds.size()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_location(&mut self, location: Point) {
        self.bounds.x = location.x;
        self.bounds.y = location.y;
        self.calls.push(HostCall::SetLocation(location));
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.calls.push(HostCall::SetBounds(bounds));
    }

    fn window_state(&self) -> WindowState {
        self.state
    }

    fn set_window_state(&mut self, state: WindowState) {
        self.state = state;
        if state == WindowState::Maximized {
            let size = self.maximum_size.unwrap_or(self.work_area.size());
            self.bounds = Rect::from_origin_size(self.work_area.origin(), size);
        }
        self.calls.push(HostCall::SetWindowState(state));
    }

    fn set_minimum_size(&mut self, size: Size) {
        self.calls.push(HostCall::SetMinimumSize(size));
    }

    fn set_maximum_size(&mut self, size: Size) {
        self.maximum_size = Some(size);
        self.calls.push(HostCall::SetMaximumSize(size));
    }

    fn work_area(&self) -> Rect {
        self.work_area
    }

    fn set_resizable_frame(&mut self, enabled: bool) -> bool {
        let previous = self.resizable_frame;
        self.resizable_frame = enabled;
        self.calls.push(HostCall::SetResizableFrame(enabled));
        previous
    }

    fn cursor_position(&self) -> Point {
        self.cursor_position
    }

    fn screen_to_client(&self, point: Point) -> Point {
        Point::new(point.x - self.bounds.x, point.y - self.bounds.y)
    }

    fn cursor(&self) -> CursorShape {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: CursorShape) {
        self.cursor = cursor;
        self.calls.push(HostCall::SetCursor(cursor));
    }

    fn release_capture(&mut self) {
        self.calls.push(HostCall::ReleaseCapture);
    }

    fn begin_nonclient_drag(&mut self, code: HitTestCode) {
        self.calls.push(HostCall::BeginNonclientDrag(code));
    }

    fn send_system_command(&mut self, command: u32, lparam: isize) {
        self.calls.push(HostCall::SystemCommand(command, lparam));
    }

    fn show_system_menu(&mut self, at: Point) -> Option<u32> {
        self.calls.push(HostCall::ShowSystemMenu(at));
        self.menu_choice
    }

    fn composition_enabled(&self) -> bool {
        self.composition
    }

    fn extend_frame_shadow(&mut self) {
        self.calls.push(HostCall::ExtendFrameShadow);
    }

    fn apply_drop_shadow_fallback(&mut self) {
        self.calls.push(HostCall::DropShadowFallback);
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
        self.calls.push(HostCall::SetOpacity(opacity));
    }

    fn start_timer(&mut self, interval: Duration) {
        self.timer = Some(interval);
        self.calls.push(HostCall::StartTimer(interval));
    }

    fn stop_timer(&mut self) {
        self.timer = None;
        self.calls.push(HostCall::StopTimer);
    }

    fn invalidate(&mut self) {
        self.calls.push(HostCall::Invalidate);
    }

    fn close(&mut self) {
        self.calls.push(HostCall::Close);
    }

    fn global_mouse_waker(&self) -> Option<MouseWaker> {
        let wakes = Arc::clone(&self.wakes);
        Some(Box::new(move || {
            wakes.fetch_add(1, Ordering::SeqCst);
        }))
    }
}

/// A controller that has seen `Load`, with the fade-in run to completion and
/// the call log cleared.
pub fn loaded(settings: ChromeSettings) -> (ChromeController, MockHost) {
    loaded_with(settings, MockHost::default())
}

pub fn loaded_with(settings: ChromeSettings, mut host: MockHost) -> (ChromeController, MockHost) {
    let mut controller = ChromeController::new(settings, &mut host);
    controller.handle_message(&mut host, WindowMessage::Load);
    run_timer(&mut controller, &mut host);
    host.calls.clear();
    (controller, host)
}

/// Deliver timer ticks until the host timer stops; returns the tick count.
pub fn run_timer(controller: &mut ChromeController, host: &mut MockHost) -> usize {
    let mut ticks = 0;
    while host.timer.is_some() && ticks < 10_000 {
        controller.handle_message(host, WindowMessage::Timer(1));
        ticks += 1;
    }
    ticks
}

pub fn move_to(controller: &mut ChromeController, host: &mut MockHost, at: Point) -> MessageOutcome {
    host.point_at(at);
    controller.handle_message(host, WindowMessage::MouseMove(at))
}

pub fn press(
    controller: &mut ChromeController,
    host: &mut MockHost,
    button: MouseButton,
    at: Point,
) -> MessageOutcome {
    host.point_at(at);
    controller.handle_message(host, WindowMessage::ButtonDown { button, point: at })
}

pub fn release(
    controller: &mut ChromeController,
    host: &mut MockHost,
    button: MouseButton,
    at: Point,
) -> MessageOutcome {
    host.point_at(at);
    controller.handle_message(host, WindowMessage::ButtonUp { button, point: at })
}

pub fn click(controller: &mut ChromeController, host: &mut MockHost, at: Point) {
    move_to(controller, host, at);
    press(controller, host, MouseButton::Left, at);
    release(controller, host, MouseButton::Left, at);
}
