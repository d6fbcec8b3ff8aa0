use custom_chrome::animation::FadeKind;
use custom_chrome::geometry::Point;
use custom_chrome::message::WindowMessage;
use custom_chrome::settings::ChromeSettings;
use std::time::Duration;

#[path = "mock_host.rs"]
mod mock_host;
use mock_host::{click, loaded, run_timer, HostCall, MockHost};

const CLOSE: Point = Point::new(380, 10);

fn strictly(values: &[f64], cmp: impl Fn(f64, f64) -> bool) -> bool {
    values.windows(2).all(|w| cmp(w[0], w[1]))
}

#[test]
fn fade_in_runs_one_tick_per_interval_plus_one() {
    let mut host = MockHost::default();
    let mut controller = custom_chrome::ChromeController::new(ChromeSettings::default(), &mut host);
    controller.handle_message(&mut host, WindowMessage::Load);

    assert_eq!(host.opacities(), vec![0.0]);
    assert_eq!(host.timer, Some(Duration::from_millis(25)));
    assert_eq!(controller.fade_kind(), Some(FadeKind::In));

    let ticks = run_timer(&mut controller, &mut host);
    assert_eq!(ticks, 11);

    let values = host.opacities()[1..].to_vec();
    assert_eq!(values.len(), 11);
    assert!(strictly(&values, |a, b| a < b), "{values:?}");
    assert_eq!(values.last().copied(), Some(1.0));
    assert_eq!(host.count(&HostCall::StopTimer), 1);
    assert_eq!(controller.fade_kind(), None);
}

#[test]
fn fade_in_duration_comes_from_settings() {
    let settings = ChromeSettings {
        fade_in_ms: 100,
        ..ChromeSettings::default()
    };
    let mut host = MockHost::default();
    let mut controller = custom_chrome::ChromeController::new(settings, &mut host);
    controller.handle_message(&mut host, WindowMessage::Load);
    assert_eq!(run_timer(&mut controller, &mut host), 5);
}

#[test]
fn fade_in_stops_when_the_window_is_hidden() {
    let mut host = MockHost::default();
    let mut controller = custom_chrome::ChromeController::new(ChromeSettings::default(), &mut host);
    controller.handle_message(&mut host, WindowMessage::Load);
    run_timer_steps(&mut controller, &mut host, 3);

    host.visible = false;
    host.calls.clear();
    assert_eq!(run_timer(&mut controller, &mut host), 1);
    assert!(host.opacities().is_empty());
    assert_eq!(host.calls, vec![HostCall::StopTimer]);
    assert_eq!(controller.fade_kind(), None);
}

#[test]
fn fade_in_stops_when_the_window_is_disposed() {
    let mut host = MockHost::default();
    let mut controller = custom_chrome::ChromeController::new(ChromeSettings::default(), &mut host);
    controller.handle_message(&mut host, WindowMessage::Load);
    host.disposed = true;
    host.calls.clear();
    assert_eq!(run_timer(&mut controller, &mut host), 1);
    assert!(host.opacities().is_empty());
}

#[test]
fn fade_out_reaches_zero_then_closes_once() {
    let (mut controller, mut host) = loaded(ChromeSettings::default());
    click(&mut controller, &mut host, CLOSE);
    assert_eq!(host.opacities(), vec![1.0]);
    host.calls.clear();

    let ticks = run_timer(&mut controller, &mut host);
    assert_eq!(ticks, 9);

    let values = host.opacities();
    assert_eq!(values.len(), 9);
    assert_eq!(values.first().copied(), Some(1.0));
    assert_eq!(values.last().copied(), Some(0.0));
    assert!(strictly(&values, |a, b| a > b), "{values:?}");
    assert_eq!(host.count(&HostCall::Close), 1);
    assert_eq!(host.calls.last(), Some(&HostCall::Close));
    assert!(!controller.is_subscribed());
}

#[test]
fn stray_timer_ticks_only_stop_the_timer() {
    let (mut controller, mut host) = loaded(ChromeSettings::default());
    controller.handle_message(&mut host, WindowMessage::Timer(1));
    assert_eq!(host.calls, vec![HostCall::StopTimer]);
}

fn run_timer_steps(
    controller: &mut custom_chrome::ChromeController,
    host: &mut MockHost,
    steps: usize,
) {
    for _ in 0..steps {
        controller.handle_message(host, WindowMessage::Timer(1));
    }
}
