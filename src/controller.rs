//! Message handling for an owner-drawn window frame.
//!
//! [`ChromeController`] owns all chrome state (layout, caption buttons,
//! resize direction, fades) and drives a [`HostWindow`] in response to the
//! messages the host forwards to it. Every call happens on the UI thread.

use crate::animation::{AnimationStep, Fade, FadeKind};
use crate::buttons::{ButtonAction, ButtonState, ButtonStateMachine, ChromeButton, PointerTrigger};
use crate::color::{optimized_text_color, Color};
use crate::geometry::{DpiScale, Point, Rect};
use crate::hit_test::{resize_direction, resize_edge_for, CursorShape, HitTestCode, ResizeDirection};
use crate::host::{BeforeClosingEvent, HostWindow, WindowState};
use crate::layout::ChromeLayout;
use crate::message::{MouseButton, WindowMessage};
use crate::mouse_filter::{self, MouseEventKind, MouseSubscription};
use crate::paint::{build_scene, ChromeVisuals, Painter, Scene};
use crate::settings::ChromeSettings;

/// Whether the host should still run its default processing for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    Default,
    /// The chrome fully handled the message; skip default processing.
    Handled,
}

type BeforeClosingHandler = Box<dyn FnMut(&mut BeforeClosingEvent)>;

/// Title-bar drag started while maximized. The anchor is set by the first
/// move, which restores the window.
#[derive(Debug, Clone, Copy, Default)]
struct TitleDrag {
    anchor: Option<Point>,
}

pub struct ChromeController {
    settings: ChromeSettings,
    layout: ChromeLayout,
    buttons: ButtonStateMachine,
    resize_direction: ResizeDirection,
    title_drag: Option<TitleDrag>,
    restore_bounds: Option<Rect>,
    active: bool,
    text_color: Color,
    composition: bool,
    fade: Option<Fade>,
    before_closing: Vec<BeforeClosingHandler>,
    mouse: Option<MouseSubscription>,
}

impl ChromeController {
    /// Attach to a freshly created host. Without desktop composition the
    /// host falls back to its class-level drop shadow.
    pub fn new(settings: ChromeSettings, host: &mut dyn HostWindow) -> Self {
        let composition = host.composition_enabled();
        if !composition {
            tracing::debug!("desktop composition unavailable; using class drop shadow");
            host.apply_drop_shadow_fallback();
        }
        let mut layout = ChromeLayout::new(&settings, DpiScale::new(host.dpi()));
        layout.resize(&settings, host.client_size());
        let text_color = optimized_text_color(settings.title_bar_color);
        Self {
            settings,
            layout,
            buttons: ButtonStateMachine::new(),
            resize_direction: ResizeDirection::None,
            title_drag: None,
            restore_bounds: None,
            active: true,
            text_color,
            composition,
            fade: None,
            before_closing: Vec::new(),
            mouse: None,
        }
    }

    pub fn settings(&self) -> &ChromeSettings {
        &self.settings
    }

    pub fn layout(&self) -> &ChromeLayout {
        &self.layout
    }

    /// Area below the title bar available to content.
    pub fn user_area(&self) -> Rect {
        self.layout.user_area()
    }

    pub fn title_bar_bounds(&self) -> Rect {
        self.layout.title_bar()
    }

    pub fn button_bounds(&self, button: ChromeButton) -> Option<Rect> {
        self.layout.button_bounds(button)
    }

    pub fn button_state(&self) -> ButtonState {
        self.buttons.state()
    }

    pub fn resize_direction(&self) -> ResizeDirection {
        self.resize_direction
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn restore_bounds(&self) -> Option<Rect> {
        self.restore_bounds
    }

    pub fn composition_enabled(&self) -> bool {
        self.composition
    }

    pub fn fade_kind(&self) -> Option<FadeKind> {
        self.fade.as_ref().map(|fade| fade.kind)
    }

    pub fn is_subscribed(&self) -> bool {
        self.mouse.is_some()
    }

    pub fn set_title_bar_color(&mut self, host: &mut dyn HostWindow, color: Color) {
        self.settings.title_bar_color = color;
        self.text_color = optimized_text_color(color);
        host.invalidate();
    }

    /// Register a handler for close requests made with the caption button.
    pub fn on_before_closing<F>(&mut self, handler: F)
    where
        F: FnMut(&mut BeforeClosingEvent) + 'static,
    {
        self.before_closing.push(Box::new(handler));
    }

    pub fn handle_message(
        &mut self,
        host: &mut dyn HostWindow,
        message: WindowMessage,
    ) -> MessageOutcome {
        if host.is_inert() {
            return MessageOutcome::Default;
        }
        match message {
            WindowMessage::Load => self.on_load(host),
            WindowMessage::Resized(size) => self.layout.resize(&self.settings, size),
            WindowMessage::Activated(active) => {
                self.active = active;
                host.invalidate();
            }
            WindowMessage::MouseMove(point) => self.on_mouse_move(host, point),
            WindowMessage::ButtonDown { button, point } => {
                self.on_mouse_down(host, button, point);
                match button {
                    MouseButton::Left => self.begin_caption_drag(host),
                    MouseButton::Right => self.show_system_menu(host),
                }
            }
            WindowMessage::ButtonUp { button, point } => self.on_mouse_up(host, button, point),
            WindowMessage::DoubleClick { button, point } => {
                self.on_double_click(host, button, point)
            }
            WindowMessage::MouseLeave => {
                self.buttons.reset();
                host.invalidate();
            }
            WindowMessage::NcLeftButtonDown { hit_test, lparam } => {
                return self.on_nc_left_button_down(host, hit_test, lparam);
            }
            WindowMessage::NcPaint => {
                if self.composition {
                    host.extend_frame_shadow();
                }
            }
            WindowMessage::Timer(_) => self.tick_fade(host),
        }
        MessageOutcome::Default
    }

    /// Replay moves published by the global mouse filter, so hover and
    /// dragging keep tracking while the pointer is over child content.
    pub fn on_global_mouse(&mut self, host: &mut dyn HostWindow) {
        if host.is_inert() || host.is_disposed() {
            return;
        }
        let Some(events) = self.mouse.as_ref().map(MouseSubscription::drain) else {
            return;
        };
        for event in events {
            if event.kind == MouseEventKind::Move {
                let client = host.screen_to_client(event.screen);
                self.on_mouse_move(host, client);
            }
        }
    }

    /// Take a subscription from the process-wide filter; done on load. The
    /// host's waker lets it schedule [`Self::on_global_mouse`] as events arrive.
    pub fn subscribe_global_mouse(&mut self, host: &dyn HostWindow) {
        if self.mouse.is_none() {
            let waker = host.global_mouse_waker();
            self.mouse = mouse_filter::with_filter(|filter| {
                filter.subscribe_with_waker(&[MouseEventKind::Move], waker)
            });
        }
    }

    pub fn detach_mouse_filter(&mut self) {
        if let Some(subscription) = self.mouse.take() {
            mouse_filter::with_filter(|filter| filter.unsubscribe(subscription.id()));
        }
    }

    pub fn scene(&self, host: &dyn HostWindow) -> Scene {
        let title = host.title();
        build_scene(&ChromeVisuals {
            layout: &self.layout,
            title: &title,
            backdrop_color: self.settings.backdrop_color,
            title_bar_color: self.settings.title_bar_color,
            border_color: self.settings.border_color,
            text_color: self.text_color,
            button_state: self.buttons.state(),
            maximized: host.window_state() == WindowState::Maximized,
            active: self.active,
        })
    }

    pub fn paint(&self, host: &dyn HostWindow, painter: &mut dyn Painter) {
        self.scene(host).replay(painter);
    }

    pub fn minimize(&mut self, host: &mut dyn HostWindow) {
        self.restore_bounds = Some(host.bounds());
        // Borderless windows only minimize with the sizing frame style set.
        let previous = host.set_resizable_frame(true);
        host.set_window_state(WindowState::Minimized);
        host.set_resizable_frame(previous);
        tracing::debug!("window minimized");
    }

    pub fn maximize(&mut self, host: &mut dyn HostWindow) {
        self.restore_bounds = Some(host.bounds());
        let work_area = host.work_area();
        host.set_maximum_size(work_area.size());
        host.set_window_state(WindowState::Maximized);
        self.clear_resize_direction(host);
        tracing::debug!(?work_area, "window maximized");
    }

    pub fn restore(&mut self, host: &mut dyn HostWindow) {
        host.set_window_state(WindowState::Normal);
        if let Some(bounds) = self.restore_bounds {
            host.set_bounds(bounds);
        }
        self.clear_resize_direction(host);
        tracing::debug!(bounds = ?self.restore_bounds, "window restored");
    }

    /// Ask the before-closing handlers and, unless one cancels, fade out and close.
    pub fn request_close(&mut self, host: &mut dyn HostWindow) {
        let mut event = BeforeClosingEvent::default();
        for handler in &mut self.before_closing {
            handler(&mut event);
        }
        if event.cancel {
            tracing::debug!("close cancelled");
            return;
        }
        host.set_opacity(FadeKind::Out.start_opacity());
        self.start_fade(host, FadeKind::Out);
    }

    fn on_load(&mut self, host: &mut dyn HostWindow) {
        self.layout = ChromeLayout::new(&self.settings, DpiScale::new(host.dpi()));
        self.layout.resize(&self.settings, host.client_size());
        self.text_color = optimized_text_color(self.settings.title_bar_color);
        host.set_minimum_size(self.layout.minimum_size());
        host.set_opacity(FadeKind::In.start_opacity());
        self.start_fade(host, FadeKind::In);
        self.subscribe_global_mouse(host);
        tracing::debug!(
            dpi = self.layout.scale().dpi(),
            title_bar_height = self.layout.title_bar_height(),
            "chrome loaded"
        );
    }

    fn start_fade(&mut self, host: &mut dyn HostWindow, kind: FadeKind) {
        let duration = match kind {
            FadeKind::In => self.settings.fade_in(),
            FadeKind::Out => self.settings.fade_out(),
        };
        let fade = Fade::new(kind, duration);
        host.start_timer(fade.animation.interval());
        tracing::debug!(?kind, frames = fade.animation.frequency(), "fade started");
        self.fade = Some(fade);
    }

    fn tick_fade(&mut self, host: &mut dyn HostWindow) {
        let Some(fade) = self.fade.as_mut() else {
            host.stop_timer();
            return;
        };
        let kind = fade.kind;
        let mut reached_zero = false;
        let step = fade.animation.tick(|frame, frequency| match kind {
            FadeKind::In => {
                if !host.is_visible() || host.is_disposed() {
                    return false;
                }
                host.set_opacity(kind.opacity(frame, frequency));
                true
            }
            FadeKind::Out => {
                let opacity = kind.opacity(frame, frequency);
                host.set_opacity(opacity);
                reached_zero = opacity == 0.0;
                true
            }
        });
        if step == AnimationStep::Finished {
            host.stop_timer();
            self.fade = None;
            tracing::debug!(?kind, "fade finished");
        }
        if reached_zero {
            self.detach_mouse_filter();
            host.close();
        }
    }

    fn on_mouse_move(&mut self, host: &mut dyn HostWindow, point: Point) {
        let maximized = host.window_state() == WindowState::Maximized;
        if let Some(drag) = self.title_drag {
            let cursor = host.cursor_position();
            let anchor = match drag.anchor {
                Some(anchor) => anchor,
                None if maximized => {
                    self.restore(host);
                    let width = host.bounds().width;
                    Point::new(width / 2, self.layout.resize_border() / 2)
                }
                // Restored some other way since the press: keep the grab offset.
                None => {
                    let bounds = host.bounds();
                    Point::new(cursor.x - bounds.x, cursor.y - bounds.y)
                }
            };
            self.title_drag = Some(TitleDrag {
                anchor: Some(anchor),
            });
            host.set_location(Point::new(cursor.x - anchor.x, cursor.y - anchor.y));
        } else if self.settings.resizable {
            if maximized {
                host.set_cursor(CursorShape::Default);
            } else {
                self.update_resize_direction(host, point);
            }
        }
        self.update_buttons(host, point, PointerTrigger::Move);
    }

    fn update_resize_direction(&mut self, host: &mut dyn HostWindow, point: Point) {
        let direction = resize_direction(
            point,
            self.layout.window_size(),
            self.layout.resize_border(),
        );
        self.resize_direction = direction;
        if direction.is_none() {
            if host.cursor().is_resize() {
                host.set_cursor(CursorShape::Default);
            }
        } else {
            host.set_cursor(direction.cursor());
        }
    }

    fn clear_resize_direction(&mut self, host: &mut dyn HostWindow) {
        self.resize_direction = ResizeDirection::None;
        if host.cursor().is_resize() {
            host.set_cursor(CursorShape::Default);
        }
    }

    fn on_mouse_down(&mut self, host: &mut dyn HostWindow, button: MouseButton, point: Point) {
        let trigger = match button {
            MouseButton::Left => PointerTrigger::LeftDown,
            MouseButton::Right => PointerTrigger::OtherDown,
        };
        if host.window_state() == WindowState::Maximized {
            if button == MouseButton::Left && self.layout.is_caption(point) {
                self.title_drag = Some(TitleDrag::default());
            } else {
                self.update_buttons(host, point, trigger);
            }
            return;
        }

        self.update_buttons(host, point, trigger);
        if button == MouseButton::Left {
            if let Some(code) = self.resize_direction.hit_test_code() {
                tracing::trace!(?code, "starting native resize");
                host.release_capture();
                host.begin_nonclient_drag(code);
            }
        }
    }

    fn on_mouse_up(&mut self, host: &mut dyn HostWindow, button: MouseButton, point: Point) {
        if button == MouseButton::Left && self.title_drag.take().is_some() {
            return;
        }
        self.update_buttons(host, point, PointerTrigger::Release);
        host.release_capture();
    }

    fn on_double_click(&mut self, host: &mut dyn HostWindow, button: MouseButton, point: Point) {
        if button != MouseButton::Left || !self.layout.is_caption(point) {
            return;
        }
        if host.window_state() == WindowState::Maximized {
            self.restore(host);
        } else if self.settings.resizable {
            self.maximize(host);
        }
    }

    /// Left press on the free part of the title bar hands the window to the
    /// native move loop.
    fn begin_caption_drag(&mut self, host: &mut dyn HostWindow) {
        if host.window_state() == WindowState::Maximized || !self.resize_direction.is_none() {
            return;
        }
        let cursor = host.screen_to_client(host.cursor_position());
        if self.layout.is_caption(cursor) {
            host.release_capture();
            host.begin_nonclient_drag(HitTestCode::Caption);
        }
    }

    fn show_system_menu(&mut self, host: &mut dyn HostWindow) {
        let screen = host.cursor_position();
        if !self.layout.in_title_bar(host.screen_to_client(screen)) {
            return;
        }
        if let Some(command) = host.show_system_menu(screen) {
            tracing::trace!(command, "system menu command");
            host.send_system_command(command, 0);
        }
    }

    fn on_nc_left_button_down(
        &mut self,
        host: &mut dyn HostWindow,
        hit_test: u32,
        lparam: isize,
    ) -> MessageOutcome {
        if !self.settings.resizable {
            return MessageOutcome::Default;
        }
        match HitTestCode::from_raw(hit_test).and_then(resize_edge_for) {
            Some(edge) => {
                host.send_system_command(edge.size_command(), lparam);
                MessageOutcome::Handled
            }
            None => MessageOutcome::Default,
        }
    }

    fn update_buttons(&mut self, host: &mut dyn HostWindow, point: Point, trigger: PointerTrigger) {
        let transition = self.buttons.update(self.layout.slots(), point, trigger);
        if transition.changed {
            host.invalidate();
        }
        match transition.action {
            Some(ButtonAction::Minimize) => self.minimize(host),
            Some(ButtonAction::ToggleMaximize) => {
                if host.window_state() == WindowState::Maximized {
                    self.restore(host);
                } else {
                    self.maximize(host);
                }
            }
            Some(ButtonAction::Close) => self.request_close(host),
            None => {}
        }
    }
}

impl Drop for ChromeController {
    fn drop(&mut self) {
        self.detach_mouse_filter();
    }
}
