use super::gdi::GdiPainter;
use crate::controller::{ChromeController, MessageOutcome};
use crate::geometry::{Point, Rect, Size};
use crate::hit_test::{CursorShape, HitTestCode};
use crate::host::{
    BeforeClosingEvent, HostWindow, NativeRequest, NativeRequestQueue, WindowState,
};
use crate::message::{RawMessage, WindowMessage};
use crate::mouse_filter::MouseWaker;
use crate::settings::ChromeSettings;
use anyhow::anyhow;
use std::cell::RefCell;
use std::ffi::c_void;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{BOOL, COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Dwm::{
    DwmExtendFrameIntoClientArea, DwmIsCompositionEnabled, DwmSetWindowAttribute,
    DWMNCRP_ENABLED, DWMWA_NCRENDERING_POLICY,
};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject,
    EndPaint, GetMonitorInfoW, InvalidateRect, MonitorFromWindow, ScreenToClient, SelectObject,
    MONITORINFO, MONITOR_DEFAULTTONEAREST, PAINTSTRUCT, SRCCOPY,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Controls::MARGINS;
use windows::Win32::UI::HiDpi::GetDpiForWindow;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    ReleaseCapture, TrackMouseEvent, TME_LEAVE, TRACKMOUSEEVENT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetClassLongPtrW,
    GetClientRect, GetCursorPos, GetMessageW, GetSystemMenu, GetWindowLongPtrW, GetWindowRect,
    GetWindowTextLengthW, GetWindowTextW, IsIconic, IsWindow, IsWindowVisible, IsZoomed,
    KillTimer, LoadCursorW, PostMessageW, PostQuitMessage, RegisterClassW, SendMessageW,
    SetClassLongPtrW, SetCursor, SetLayeredWindowAttributes, SetTimer, SetWindowLongPtrW,
    SetWindowPos, ShowWindow, TrackPopupMenuEx, TranslateMessage, UpdateWindow, CS_DBLCLKS,
    CS_DROPSHADOW, CS_HREDRAW, CS_VREDRAW, GCL_STYLE, GWLP_USERDATA, GWL_STYLE, HTCLIENT,
    IDC_ARROW, IDC_SIZENESW, IDC_SIZENS, IDC_SIZENWSE, IDC_SIZEWE, LWA_ALPHA, MINMAXINFO, MSG,
    SWP_NOACTIVATE, SWP_NOSIZE, SWP_NOZORDER, SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, SW_SHOW,
    TPM_LEFTALIGN, TPM_RETURNCMD, WINDOW_STYLE, WM_APP, WM_CLOSE, WM_DESTROY,
    WM_ERASEBKGND, WM_GETMINMAXINFO, WM_MOUSEMOVE, WM_NCCALCSIZE, WM_NCDESTROY,
    WM_NCLBUTTONDOWN, WM_PAINT, WM_SETCURSOR, WM_SYSCOMMAND, WNDCLASSW, WS_CLIPCHILDREN,
    WS_EX_APPWINDOW, WS_EX_LAYERED, WS_MINIMIZEBOX, WS_POPUP, WS_SYSMENU, WS_THICKFRAME,
};

const CLASS_NAME: &str = "CustomChromeWindow";
const FADE_TIMER_ID: usize = 1;
/// Posted by the global mouse waker; the handler drains the subscription.
const WM_CHROME_GLOBAL_MOUSE: u32 = WM_APP + 1;

fn widestring(value: &str) -> Vec<u16> {
    use std::os::windows::ffi::OsStrExt;
    std::ffi::OsStr::new(value)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

fn from_rect(rect: RECT) -> Rect {
    Rect::new(
        rect.left,
        rect.top,
        rect.right - rect.left,
        rect.bottom - rect.top,
    )
}

/// [`HostWindow`] over a borderless layered popup.
pub struct Win32Host {
    hwnd: HWND,
    cursor: CursorShape,
    opacity: f64,
    minimum_size: Size,
    maximum_size: Option<Size>,
    disposed: bool,
    /// Move/size loops and the system menu, run after the controller returns.
    requests: NativeRequestQueue,
    /// Set while a wake message is in flight, so a burst of moves posts one.
    wake_pending: Arc<AtomicBool>,
}

impl Win32Host {
    fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            cursor: CursorShape::Default,
            opacity: 1.0,
            minimum_size: Size::default(),
            maximum_size: None,
            disposed: false,
            requests: NativeRequestQueue::default(),
            wake_pending: Arc::new(AtomicBool::new(false)),
        }
    }

    fn take_requests(&mut self) -> Vec<NativeRequest> {
        self.requests.take()
    }

    fn apply_cursor(&self) {
        let id = match self.cursor {
            CursorShape::Default => IDC_ARROW,
            CursorShape::SizeNESW => IDC_SIZENESW,
            CursorShape::SizeNWSE => IDC_SIZENWSE,
            CursorShape::SizeWE => IDC_SIZEWE,
            CursorShape::SizeNS => IDC_SIZENS,
        };
        if let Ok(cursor) = unsafe { LoadCursorW(HINSTANCE::default(), id) } {
            unsafe {
                SetCursor(cursor);
            }
        }
    }

    fn fill_min_max_info(&self, info: &mut MINMAXINFO) {
        info.ptMinTrackSize.x = self.minimum_size.width;
        info.ptMinTrackSize.y = self.minimum_size.height;
        if let Some(max) = self.maximum_size {
            let work = self.work_area();
            let monitor = self.monitor_rect().unwrap_or(work);
            info.ptMaxSize.x = max.width;
            info.ptMaxSize.y = max.height;
            info.ptMaxPosition.x = work.x - monitor.x;
            info.ptMaxPosition.y = work.y - monitor.y;
        }
    }

    fn monitor_info(&self) -> Option<MONITORINFO> {
        let monitor = unsafe { MonitorFromWindow(self.hwnd, MONITOR_DEFAULTTONEAREST) };
        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        unsafe { GetMonitorInfoW(monitor, &mut info) }
            .as_bool()
            .then_some(info)
    }

    fn monitor_rect(&self) -> Option<Rect> {
        self.monitor_info().map(|info| from_rect(info.rcMonitor))
    }
}

impl HostWindow for Win32Host {
    fn is_disposed(&self) -> bool {
        self.disposed || !unsafe { IsWindow(self.hwnd) }.as_bool()
    }

    fn is_visible(&self) -> bool {
        unsafe { IsWindowVisible(self.hwnd) }.as_bool()
    }

    fn title(&self) -> String {
        let len = unsafe { GetWindowTextLengthW(self.hwnd) };
        if len <= 0 {
            return String::new();
        }
        let mut buffer = vec![0u16; len as usize + 1];
        let copied = unsafe { GetWindowTextW(self.hwnd, &mut buffer) };
        String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
    }

    fn dpi(&self) -> u32 {
        unsafe { GetDpiForWindow(self.hwnd) }
    }

    fn client_size(&self) -> Size {
        let mut rect = RECT::default();
        match unsafe { GetClientRect(self.hwnd, &mut rect) } {
            Ok(()) => from_rect(rect).size(),
            Err(_) => Size::default(),
        }
    }

    fn bounds(&self) -> Rect {
        let mut rect = RECT::default();
        match unsafe { GetWindowRect(self.hwnd, &mut rect) } {
            Ok(()) => from_rect(rect),
            Err(_) => Rect::default(),
        }
    }

    fn set_location(&mut self, location: Point) {
        let _ = unsafe {
            SetWindowPos(
                self.hwnd,
                HWND::default(),
                location.x,
                location.y,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            )
        };
    }

    fn set_bounds(&mut self, bounds: Rect) {
        let _ = unsafe {
            SetWindowPos(
                self.hwnd,
                HWND::default(),
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )
        };
    }

    fn window_state(&self) -> WindowState {
        if unsafe { IsIconic(self.hwnd) }.as_bool() {
            WindowState::Minimized
        } else if unsafe { IsZoomed(self.hwnd) }.as_bool() {
            WindowState::Maximized
        } else {
            WindowState::Normal
        }
    }

    fn set_window_state(&mut self, state: WindowState) {
        let command = match state {
            WindowState::Normal => SW_RESTORE,
            WindowState::Minimized => SW_MINIMIZE,
            WindowState::Maximized => SW_MAXIMIZE,
        };
        let _ = unsafe { ShowWindow(self.hwnd, command) };
    }

    fn set_minimum_size(&mut self, size: Size) {
        self.minimum_size = size;
    }

    fn set_maximum_size(&mut self, size: Size) {
        self.maximum_size = Some(size);
    }

    fn work_area(&self) -> Rect {
        self.monitor_info()
            .map(|info| from_rect(info.rcWork))
            .unwrap_or_default()
    }

    fn set_resizable_frame(&mut self, enabled: bool) -> bool {
        let style = unsafe { GetWindowLongPtrW(self.hwnd, GWL_STYLE) };
        let frame = WS_THICKFRAME.0 as isize;
        let previous = style & frame != 0;
        let next = if enabled { style | frame } else { style & !frame };
        if next != style {
            unsafe {
                let _ = SetWindowLongPtrW(self.hwnd, GWL_STYLE, next);
            }
        }
        previous
    }

    fn cursor_position(&self) -> Point {
        let mut point = POINT::default();
        match unsafe { GetCursorPos(&mut point) } {
            Ok(()) => Point::new(point.x, point.y),
            Err(_) => Point::default(),
        }
    }

    fn screen_to_client(&self, point: Point) -> Point {
        let mut native = POINT {
            x: point.x,
            y: point.y,
        };
        let _ = unsafe { ScreenToClient(self.hwnd, &mut native) };
        Point::new(native.x, native.y)
    }

    fn cursor(&self) -> CursorShape {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: CursorShape) {
        self.cursor = cursor;
        self.apply_cursor();
    }

    fn release_capture(&mut self) {
        let _ = unsafe { ReleaseCapture() };
    }

    fn begin_nonclient_drag(&mut self, code: HitTestCode) {
        self.requests.push(NativeRequest::NonclientDrag(code));
    }

    fn send_system_command(&mut self, command: u32, lparam: isize) {
        self.requests
            .push(NativeRequest::SystemCommand { command, lparam });
    }

    fn show_system_menu(&mut self, at: Point) -> Option<u32> {
        self.requests.push(NativeRequest::SystemMenu(at));
        None
    }

    fn composition_enabled(&self) -> bool {
        unsafe { DwmIsCompositionEnabled() }
            .map(|enabled| enabled.as_bool())
            .unwrap_or(false)
    }

    fn extend_frame_shadow(&mut self) {
        let policy = DWMNCRP_ENABLED;
        let margins = MARGINS {
            cxLeftWidth: 0,
            cxRightWidth: 0,
            cyTopHeight: 0,
            cyBottomHeight: 1,
        };
        unsafe {
            let _ = DwmSetWindowAttribute(
                self.hwnd,
                DWMWA_NCRENDERING_POLICY,
                &policy as *const _ as *const c_void,
                std::mem::size_of_val(&policy) as u32,
            );
            if let Err(err) = DwmExtendFrameIntoClientArea(self.hwnd, &margins) {
                tracing::debug!(?err, "frame shadow unavailable");
            }
        }
    }

    fn apply_drop_shadow_fallback(&mut self) {
        unsafe {
            let style = GetClassLongPtrW(self.hwnd, GCL_STYLE);
            let _ = SetClassLongPtrW(
                self.hwnd,
                GCL_STYLE,
                (style | CS_DROPSHADOW.0 as usize) as isize,
            );
        }
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
        let alpha = (self.opacity * 255.0).round() as u8;
        if let Err(err) =
            unsafe { SetLayeredWindowAttributes(self.hwnd, COLORREF(0), alpha, LWA_ALPHA) }
        {
            tracing::debug!(?err, "failed to set window opacity");
        }
    }

    fn start_timer(&mut self, interval: Duration) {
        unsafe {
            SetTimer(self.hwnd, FADE_TIMER_ID, interval.as_millis() as u32, None);
        }
    }

    fn stop_timer(&mut self) {
        let _ = unsafe { KillTimer(self.hwnd, FADE_TIMER_ID) };
    }

    fn invalidate(&mut self) {
        unsafe {
            let _ = InvalidateRect(self.hwnd, None, false);
        }
    }

    fn close(&mut self) {
        let _ = unsafe { PostMessageW(self.hwnd, WM_CLOSE, WPARAM(0), LPARAM(0)) };
    }

    fn global_mouse_waker(&self) -> Option<MouseWaker> {
        // HWND is not Send; the handle value is valid on any thread.
        let raw = self.hwnd.0 as isize;
        let pending = Arc::clone(&self.wake_pending);
        Some(Box::new(move || {
            if pending.swap(true, Ordering::AcqRel) {
                return;
            }
            let posted = unsafe {
                PostMessageW(
                    HWND(raw as *mut c_void),
                    WM_CHROME_GLOBAL_MOUSE,
                    WPARAM(0),
                    LPARAM(0),
                )
            };
            if posted.is_err() {
                pending.store(false, Ordering::Release);
            }
        }))
    }
}

/// Run queued native calls. No chrome state may be borrowed here: each call
/// can spin a modal loop that re-enters the window procedure.
fn run_native_requests(hwnd: HWND, requests: Vec<NativeRequest>) {
    for request in requests {
        match request {
            NativeRequest::NonclientDrag(code) => unsafe {
                SendMessageW(
                    hwnd,
                    WM_NCLBUTTONDOWN,
                    WPARAM(code.raw() as usize),
                    LPARAM(0),
                );
            },
            NativeRequest::SystemCommand { command, lparam } => unsafe {
                SendMessageW(hwnd, WM_SYSCOMMAND, WPARAM(command as usize), LPARAM(lparam));
            },
            NativeRequest::SystemMenu(at) => {
                if let Some(command) = track_system_menu(hwnd, at) {
                    tracing::trace!(command, "system menu command");
                    unsafe {
                        SendMessageW(hwnd, WM_SYSCOMMAND, WPARAM(command as usize), LPARAM(0));
                    }
                }
            }
        }
    }
}

fn track_system_menu(hwnd: HWND, at: Point) -> Option<u32> {
    let menu = unsafe { GetSystemMenu(hwnd, false) };
    if menu.0.is_null() {
        return None;
    }
    let chosen = unsafe {
        TrackPopupMenuEx(
            menu,
            (TPM_LEFTALIGN | TPM_RETURNCMD).0,
            at.x,
            at.y,
            hwnd,
            None,
        )
    };
    (chosen.0 > 0).then_some(chosen.0 as u32)
}

struct WindowData {
    host: RefCell<Win32Host>,
    controller: RefCell<Option<ChromeController>>,
    wake_pending: Arc<AtomicBool>,
}

impl WindowData {
    /// Re-entrant messages (sent while the controller is busy) fall through
    /// to default processing. Queued native calls run after both borrows are
    /// released, so the move/size loop and the system menu can repaint,
    /// resize and tick the fade timer.
    fn dispatch(&self, hwnd: HWND, message: WindowMessage) -> MessageOutcome {
        let Some((outcome, requests)) = self.with_controller(|controller, host| {
            let outcome = controller.handle_message(host, message);
            controller.on_global_mouse(host);
            outcome
        }) else {
            return MessageOutcome::Default;
        };
        run_native_requests(hwnd, requests);
        outcome
    }

    /// Woken by the global mouse filter; replays what it queued.
    fn pump_global_mouse(&self, hwnd: HWND) {
        self.wake_pending.store(false, Ordering::Release);
        if let Some(((), requests)) =
            self.with_controller(|controller, host| controller.on_global_mouse(host))
        {
            run_native_requests(hwnd, requests);
        }
    }

    fn with_controller<R>(
        &self,
        f: impl FnOnce(&mut ChromeController, &mut Win32Host) -> R,
    ) -> Option<(R, Vec<NativeRequest>)> {
        let mut host = self.host.try_borrow_mut().ok()?;
        let mut controller = self.controller.try_borrow_mut().ok()?;
        let controller = controller.as_mut()?;
        let result = f(controller, &mut host);

        // Size changes made by the controller itself arrive re-entrantly.
        let size = host.client_size();
        if controller.layout().window_size() != size {
            controller.handle_message(&mut *host, WindowMessage::Resized(size));
        }
        Some((result, host.take_requests()))
    }

    fn paint(&self, hwnd: HWND) {
        let mut ps = PAINTSTRUCT::default();
        let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
        if hdc.0.is_null() {
            return;
        }
        if let (Ok(host), Ok(controller)) = (self.host.try_borrow(), self.controller.try_borrow()) {
            if let Some(controller) = controller.as_ref() {
                let size = host.client_size();
                unsafe {
                    let buffer = CreateCompatibleDC(hdc);
                    let bitmap = CreateCompatibleBitmap(hdc, size.width, size.height);
                    let old = SelectObject(buffer, bitmap);
                    let mut painter = GdiPainter::new(buffer, size);
                    controller.paint(&*host, &mut painter);
                    let _ = BitBlt(hdc, 0, 0, size.width, size.height, buffer, 0, 0, SRCCOPY);
                    SelectObject(buffer, old);
                    let _ = DeleteObject(bitmap);
                    let _ = DeleteDC(buffer);
                }
            }
        }
        unsafe {
            let _ = EndPaint(hwnd, &ps);
        }
    }
}

unsafe extern "system" fn chrome_wndproc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let data = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *const WindowData;
    if data.is_null() {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }
    let data = unsafe { &*data };

    match msg {
        // The whole window is client area, even while WS_THICKFRAME is set.
        WM_NCCALCSIZE if wparam.0 != 0 => return LRESULT(0),
        WM_ERASEBKGND => return LRESULT(1),
        WM_PAINT => {
            data.paint(hwnd);
            return LRESULT(0);
        }
        WM_GETMINMAXINFO => {
            if let Ok(host) = data.host.try_borrow() {
                let info = unsafe { &mut *(lparam.0 as *mut MINMAXINFO) };
                host.fill_min_max_info(info);
                return LRESULT(0);
            }
        }
        WM_SETCURSOR if (lparam.0 & 0xffff) as u32 == HTCLIENT => {
            if let Ok(host) = data.host.try_borrow() {
                if host.cursor.is_resize() {
                    host.apply_cursor();
                    return LRESULT(1);
                }
            }
        }
        WM_MOUSEMOVE => {
            let mut track = TRACKMOUSEEVENT {
                cbSize: std::mem::size_of::<TRACKMOUSEEVENT>() as u32,
                dwFlags: TME_LEAVE,
                hwndTrack: hwnd,
                dwHoverTime: 0,
            };
            let _ = unsafe { TrackMouseEvent(&mut track) };
        }
        WM_DESTROY => {
            if let Ok(mut host) = data.host.try_borrow_mut() {
                host.disposed = true;
                host.stop_timer();
            }
            unsafe { PostQuitMessage(0) };
        }
        WM_CHROME_GLOBAL_MOUSE => {
            data.pump_global_mouse(hwnd);
            return LRESULT(0);
        }
        WM_NCDESTROY => unsafe {
            let _ = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
        },
        _ => {}
    }

    let raw = RawMessage::new(msg, wparam.0, lparam.0);
    let outcome = match WindowMessage::decode(&raw) {
        Some(message) => data.dispatch(hwnd, message),
        None => MessageOutcome::Default,
    };
    match outcome {
        MessageOutcome::Handled => LRESULT(0),
        MessageOutcome::Default => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// A top-level window whose frame is drawn by a [`ChromeController`].
/// Destroying it ends the calling thread's message loop.
pub struct ChromeWindow {
    hwnd: HWND,
    data: Box<WindowData>,
}

impl ChromeWindow {
    pub fn create(title: &str, bounds: Rect, settings: ChromeSettings) -> anyhow::Result<Self> {
        static REGISTER_CLASS: Once = Once::new();
        let class_name = widestring(CLASS_NAME);
        let title = widestring(title);
        let hinstance = unsafe { GetModuleHandleW(PCWSTR::null()) }?;

        REGISTER_CLASS.call_once(|| unsafe {
            let wc = WNDCLASSW {
                style: CS_DBLCLKS | CS_HREDRAW | CS_VREDRAW,
                hInstance: hinstance.into(),
                hCursor: LoadCursorW(HINSTANCE::default(), IDC_ARROW).unwrap_or_default(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                lpfnWndProc: Some(chrome_wndproc),
                ..Default::default()
            };
            let _ = RegisterClassW(&wc);
        });

        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_LAYERED | WS_EX_APPWINDOW,
                PCWSTR(class_name.as_ptr()),
                PCWSTR(title.as_ptr()),
                WINDOW_STYLE(WS_POPUP.0 | WS_MINIMIZEBOX.0 | WS_SYSMENU.0 | WS_CLIPCHILDREN.0),
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                None,
                None,
                hinstance,
                None,
            )
        }
        .map_err(|err| anyhow!("failed to create chrome window: {err}"))?;

        let host = Win32Host::new(hwnd);
        let data = Box::new(WindowData {
            wake_pending: Arc::clone(&host.wake_pending),
            host: RefCell::new(host),
            controller: RefCell::new(None),
        });
        unsafe {
            let _ = SetWindowLongPtrW(hwnd, GWLP_USERDATA, &*data as *const WindowData as isize);
        }
        {
            let mut host = data.host.borrow_mut();
            host.set_opacity(1.0);
            let controller = ChromeController::new(settings, &mut *host);
            *data.controller.borrow_mut() = Some(controller);
        }
        tracing::debug!(?bounds, "chrome window created");
        Ok(Self { hwnd, data })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn on_before_closing<F>(&self, handler: F)
    where
        F: FnMut(&mut BeforeClosingEvent) + 'static,
    {
        if let Ok(mut controller) = self.data.controller.try_borrow_mut() {
            if let Some(controller) = controller.as_mut() {
                controller.on_before_closing(handler);
            }
        }
    }

    /// Raise the load step (layout, minimum size, fade-in) and show the window.
    pub fn show(&self) {
        self.data.dispatch(self.hwnd, WindowMessage::Load);
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOW);
            let _ = UpdateWindow(self.hwnd);
        }
    }

    /// Pump messages until the window is destroyed.
    pub fn run(&self) {
        let mut msg = MSG::default();
        loop {
            let result: BOOL = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };
            if result.0 == 0 || result.0 == -1 {
                break;
            }
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }
}

impl Drop for ChromeWindow {
    fn drop(&mut self) {
        unsafe {
            if IsWindow(self.hwnd).as_bool() {
                let _ = DestroyWindow(self.hwnd);
            }
        }
        if let Ok(mut controller) = self.data.controller.try_borrow_mut() {
            controller.take();
        }
    }
}
