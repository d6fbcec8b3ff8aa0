//! Process-wide mouse observer.
//!
//! Every mouse move and left-button press/release seen by the UI thread is
//! republished, in screen coordinates, to whoever subscribed. Nothing is ever
//! consumed. The native hook is installed when the first subscriber arrives
//! and removed when the last one leaves.

use crate::geometry::Point;
use crate::message::{RawMessage, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE};
use anyhow::anyhow;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Move,
    LeftDown,
    LeftUp,
}

impl MouseEventKind {
    pub fn from_message(code: u32) -> Option<Self> {
        match code {
            WM_MOUSEMOVE => Some(Self::Move),
            WM_LBUTTONDOWN => Some(Self::LeftDown),
            WM_LBUTTONUP => Some(Self::LeftUp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalMouseEvent {
    pub kind: MouseEventKind,
    /// Cursor position in screen coordinates.
    pub screen: Point,
}

pub type SubscriptionId = u64;

/// Called after an event lands in a subscriber's channel, so the owning
/// window can drain it even when the pointer is over one of its children.
/// Runs inside the hook callback; it must not block.
pub type MouseWaker = Box<dyn Fn() + Send>;

/// Receiving end of a subscription. Dropping it is enough to stop delivery;
/// the slot is pruned on the next publish.
#[derive(Debug)]
pub struct MouseSubscription {
    id: SubscriptionId,
    events: Receiver<GlobalMouseEvent>,
}

impl MouseSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Everything published since the last drain, oldest first.
    pub fn drain(&self) -> Vec<GlobalMouseEvent> {
        self.events.try_iter().collect()
    }
}

pub trait FilterBackend: Send {
    fn install(&mut self) -> anyhow::Result<()>;
    fn uninstall(&mut self) -> anyhow::Result<()>;
    fn is_installed(&self) -> bool;
}

#[cfg(windows)]
pub use crate::win32::hook::ThreadMouseHook as DefaultFilterBackend;

#[cfg(not(windows))]
#[derive(Default)]
pub struct DefaultFilterBackend;

#[cfg(not(windows))]
impl FilterBackend for DefaultFilterBackend {
    fn install(&mut self) -> anyhow::Result<()> {
        Err(anyhow!("mouse hooks are not supported on this platform"))
    }

    fn uninstall(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn is_installed(&self) -> bool {
        false
    }
}

struct Subscriber {
    id: SubscriptionId,
    interest: Vec<MouseEventKind>,
    sender: Sender<GlobalMouseEvent>,
    waker: Option<MouseWaker>,
}

pub struct MouseFilter {
    backend: Box<dyn FilterBackend>,
    subscribers: Vec<Subscriber>,
    next_id: SubscriptionId,
}

impl Default for MouseFilter {
    fn default() -> Self {
        Self::new_with_backend(Box::new(DefaultFilterBackend::default()))
    }
}

impl MouseFilter {
    pub fn new_with_backend(backend: Box<dyn FilterBackend>) -> Self {
        Self {
            backend,
            subscribers: Vec::new(),
            next_id: 1,
        }
    }

    /// Swap the native backend, carrying the installed state over.
    pub fn set_backend(&mut self, backend: Box<dyn FilterBackend>) {
        self.uninstall();
        self.backend = backend;
        if !self.subscribers.is_empty() {
            self.install();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_installed(&self) -> bool {
        self.backend.is_installed()
    }

    pub fn subscribe(&mut self, interest: &[MouseEventKind]) -> MouseSubscription {
        self.subscribe_with_waker(interest, None)
    }

    pub fn subscribe_with_waker(
        &mut self,
        interest: &[MouseEventKind],
        waker: Option<MouseWaker>,
    ) -> MouseSubscription {
        let (sender, events) = mpsc::channel();
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            interest: interest.to_vec(),
            sender,
            waker,
        });
        tracing::debug!(id, ?interest, "mouse filter subscriber added");
        if self.subscribers.len() == 1 {
            self.install();
        }
        MouseSubscription { id, events }
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        if self.subscribers.len() != before {
            tracing::debug!(id, "mouse filter subscriber removed");
            if self.subscribers.is_empty() {
                self.uninstall();
            }
        }
    }

    /// Fan an event out to interested subscribers, pruning closed channels.
    pub fn publish(&mut self, event: GlobalMouseEvent) {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| {
            if !s.interest.contains(&event.kind) {
                return true;
            }
            if s.sender.send(event).is_err() {
                return false;
            }
            if let Some(wake) = &s.waker {
                wake();
            }
            true
        });
        if before > 0 && self.subscribers.is_empty() {
            self.uninstall();
        }
    }

    /// Observe one message from the UI thread's stream without consuming it.
    /// Mouse messages carry client coordinates, so the caller passes the
    /// screen cursor position.
    pub fn pre_filter(&mut self, message: &RawMessage, screen: Point) {
        if let Some(kind) = MouseEventKind::from_message(message.code) {
            self.publish(GlobalMouseEvent { kind, screen });
        }
    }

    fn install(&mut self) {
        if self.backend.is_installed() {
            return;
        }
        match self.backend.install() {
            Ok(()) => tracing::debug!("mouse filter hook installed"),
            Err(err) => tracing::warn!(?err, "failed to install mouse filter hook"),
        }
    }

    fn uninstall(&mut self) {
        if !self.backend.is_installed() {
            return;
        }
        match self.backend.uninstall() {
            Ok(()) => tracing::debug!("mouse filter hook removed"),
            Err(err) => tracing::error!(?err, "failed to uninstall mouse filter hook"),
        }
    }
}

static FILTER: OnceCell<Mutex<MouseFilter>> = OnceCell::new();

fn global() -> &'static Mutex<MouseFilter> {
    FILTER.get_or_init(|| Mutex::new(MouseFilter::default()))
}

pub fn with_filter<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut MouseFilter) -> R,
{
    match global().lock() {
        Ok(mut guard) => Some(f(&mut guard)),
        Err(err) => {
            tracing::error!(?err, "failed to lock mouse filter");
            None
        }
    }
}

/// Like [`with_filter`] but gives up instead of waiting; used from hook
/// callbacks that may fire while the filter is already borrowed.
pub fn try_with_filter<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut MouseFilter) -> R,
{
    global().try_lock().ok().map(|mut guard| f(&mut guard))
}

#[derive(Clone)]
pub struct MockFilterBackend {
    state: Arc<MockFilterState>,
}

#[derive(Default)]
struct MockFilterState {
    install_count: AtomicUsize,
    uninstall_count: AtomicUsize,
    installed: Mutex<bool>,
    fail_install: Mutex<bool>,
}

impl MockFilterBackend {
    pub fn new() -> (Self, MockFilterHandle) {
        let state = Arc::new(MockFilterState::default());
        (
            Self {
                state: Arc::clone(&state),
            },
            MockFilterHandle { state },
        )
    }
}

impl FilterBackend for MockFilterBackend {
    fn install(&mut self) -> anyhow::Result<()> {
        if *self.state.fail_install.lock().map_err(|_| anyhow!("lock"))? {
            return Err(anyhow!("install refused"));
        }
        let mut installed = self.state.installed.lock().map_err(|_| anyhow!("lock"))?;
        if !*installed {
            self.state.install_count.fetch_add(1, Ordering::SeqCst);
            *installed = true;
        }
        Ok(())
    }

    fn uninstall(&mut self) -> anyhow::Result<()> {
        let mut installed = self.state.installed.lock().map_err(|_| anyhow!("lock"))?;
        if *installed {
            self.state.uninstall_count.fetch_add(1, Ordering::SeqCst);
        }
        *installed = false;
        Ok(())
    }

    fn is_installed(&self) -> bool {
        match self.state.installed.lock() {
            Ok(guard) => *guard,
            Err(_) => false,
        }
    }
}

pub struct MockFilterHandle {
    state: Arc<MockFilterState>,
}

impl MockFilterHandle {
    pub fn install_count(&self) -> usize {
        self.state.install_count.load(Ordering::SeqCst)
    }

    pub fn uninstall_count(&self) -> usize {
        self.state.uninstall_count.load(Ordering::SeqCst)
    }

    pub fn set_fail_install(&self, fail: bool) {
        if let Ok(mut guard) = self.state.fail_install.lock() {
            *guard = fail;
        }
    }
}
