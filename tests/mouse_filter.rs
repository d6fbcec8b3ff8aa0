use custom_chrome::buttons::{ButtonState, ChromeButton};
use custom_chrome::geometry::Point;
use custom_chrome::message::{RawMessage, WM_LBUTTONDOWN, WM_MOUSEMOVE};
use custom_chrome::mouse_filter::{self, MockFilterBackend, MockFilterHandle};
use custom_chrome::settings::ChromeSettings;
use serial_test::serial;

#[path = "mock_host.rs"]
mod mock_host;
use mock_host::{click, loaded, run_timer, HostCall};

fn mock_global_filter() -> MockFilterHandle {
    let (backend, handle) = MockFilterBackend::new();
    mouse_filter::with_filter(|filter| filter.set_backend(Box::new(backend)))
        .expect("mouse filter lock");
    handle
}

fn subscribers() -> usize {
    mouse_filter::with_filter(|filter| filter.subscriber_count()).unwrap_or_default()
}

fn publish(code: u32, screen: Point) {
    mouse_filter::with_filter(|filter| filter.pre_filter(&RawMessage::new(code, 0, 0), screen));
}

#[test]
#[serial]
fn load_subscribes_and_installs_the_hook() {
    let handle = mock_global_filter();
    let (controller, _host) = loaded(ChromeSettings::default());

    assert!(controller.is_subscribed());
    assert_eq!(subscribers(), 1);
    assert_eq!(handle.install_count(), 1);
    assert!(mouse_filter::with_filter(|f| f.is_installed()).unwrap_or(false));

    drop(controller);
    assert_eq!(subscribers(), 0);
    assert_eq!(handle.uninstall_count(), 1);
}

#[test]
#[serial]
fn global_moves_drive_button_hover() {
    let _handle = mock_global_filter();
    let (mut controller, mut host) = loaded(ChromeSettings::default());

    // Window at (100, 100); the close slot starts at client x 358.
    publish(WM_MOUSEMOVE, Point::new(480, 110));
    publish(WM_LBUTTONDOWN, Point::new(480, 110));
    controller.on_global_mouse(&mut host);

    assert_eq!(controller.button_state(), ButtonState::hover(ChromeButton::Close));
    assert_eq!(host.calls, vec![HostCall::Invalidate]);

    controller.on_global_mouse(&mut host);
    assert_eq!(host.count(&HostCall::Invalidate), 1);
}

#[test]
#[serial]
fn each_published_move_wakes_the_window() {
    let _handle = mock_global_filter();
    let (mut controller, mut host) = loaded(ChromeSettings::default());
    assert_eq!(host.wake_count(), 0);

    publish(WM_MOUSEMOVE, Point::new(480, 110));
    assert_eq!(host.wake_count(), 1);
    publish(WM_MOUSEMOVE, Point::new(150, 110));
    assert_eq!(host.wake_count(), 2);
    // Only moves are subscribed to.
    publish(WM_LBUTTONDOWN, Point::new(150, 110));
    assert_eq!(host.wake_count(), 2);

    // The woken window replays the backlog; the last move left the buttons.
    controller.on_global_mouse(&mut host);
    assert_eq!(controller.button_state(), ButtonState::None);
    assert_eq!(host.count(&HostCall::Invalidate), 2);

    drop(controller);
    publish(WM_MOUSEMOVE, Point::new(480, 110));
    assert_eq!(host.wake_count(), 2);
}

#[test]
#[serial]
fn disposed_hosts_ignore_global_moves() {
    let _handle = mock_global_filter();
    let (mut controller, mut host) = loaded(ChromeSettings::default());
    host.disposed = true;

    publish(WM_MOUSEMOVE, Point::new(480, 110));
    controller.on_global_mouse(&mut host);

    assert_eq!(controller.button_state(), ButtonState::None);
    assert!(host.calls.is_empty());
}

#[test]
#[serial]
fn hook_stays_until_the_last_window_leaves() {
    let handle = mock_global_filter();
    let (first, _first_host) = loaded(ChromeSettings::default());
    let (second, _second_host) = loaded(ChromeSettings::default());
    assert_eq!(subscribers(), 2);
    assert_eq!(handle.install_count(), 1);

    drop(first);
    assert_eq!(handle.uninstall_count(), 0);
    drop(second);
    assert_eq!(handle.uninstall_count(), 1);
}

#[test]
#[serial]
fn closing_detaches_before_the_window_goes_away() {
    let handle = mock_global_filter();
    let (mut controller, mut host) = loaded(ChromeSettings::default());
    click(&mut controller, &mut host, Point::new(380, 10));
    run_timer(&mut controller, &mut host);

    assert!(host.has(&HostCall::Close));
    assert!(!controller.is_subscribed());
    assert_eq!(subscribers(), 0);
    assert_eq!(handle.uninstall_count(), 1);
}

#[test]
#[serial]
fn refused_hook_still_subscribes() {
    let handle = mock_global_filter();
    handle.set_fail_install(true);
    let (controller, _host) = loaded(ChromeSettings::default());

    assert!(controller.is_subscribed());
    assert_eq!(subscribers(), 1);
    assert_eq!(handle.install_count(), 0);
    drop(controller);
    assert_eq!(subscribers(), 0);
}
