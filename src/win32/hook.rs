use crate::geometry::Point;
use crate::mouse_filter::{try_with_filter, FilterBackend, GlobalMouseEvent, MouseEventKind};
use anyhow::anyhow;
use windows::Win32::Foundation::{HINSTANCE, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, SetWindowsHookExW, UnhookWindowsHookEx, HC_ACTION, HHOOK, MOUSEHOOKSTRUCT,
    WH_MOUSE,
};

/// `WH_MOUSE` hook on the installing thread. It sees every mouse message the
/// thread retrieves, whichever of its windows the pointer is over, and
/// publishes moves and left-button transitions to the global filter.
///
/// Install and uninstall must happen on the UI thread.
#[derive(Default)]
pub struct ThreadMouseHook {
    // HHOOK as an integer so the backend can sit in the global filter.
    hook: Option<isize>,
}

impl FilterBackend for ThreadMouseHook {
    fn install(&mut self) -> anyhow::Result<()> {
        if self.hook.is_some() {
            return Ok(());
        }
        let hook = unsafe {
            SetWindowsHookExW(
                WH_MOUSE,
                Some(mouse_hook_proc),
                HINSTANCE::default(),
                GetCurrentThreadId(),
            )
        }
        .map_err(|err| anyhow!("SetWindowsHookExW failed: {err}"))?;
        if hook.0.is_null() {
            return Err(anyhow!(windows::core::Error::from_win32()));
        }
        self.hook = Some(hook.0 as isize);
        Ok(())
    }

    fn uninstall(&mut self) -> anyhow::Result<()> {
        if let Some(raw) = self.hook.take() {
            unsafe { UnhookWindowsHookEx(HHOOK(raw as *mut _)) }
                .map_err(|err| anyhow!("UnhookWindowsHookEx failed: {err}"))?;
        }
        Ok(())
    }

    fn is_installed(&self) -> bool {
        self.hook.is_some()
    }
}

unsafe extern "system" fn mouse_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 && lparam.0 != 0 {
        if let Some(kind) = MouseEventKind::from_message(wparam.0 as u32) {
            let info = unsafe { &*(lparam.0 as *const MOUSEHOOKSTRUCT) };
            let event = GlobalMouseEvent {
                kind,
                screen: Point::new(info.pt.x, info.pt.y),
            };
            // Skipped when the filter is busy on this thread; the next
            // message catches up.
            let _ = try_with_filter(|filter| filter.publish(event));
        }
    }
    unsafe { CallNextHookEx(HHOOK(std::ptr::null_mut()), code, wparam, lparam) }
}
