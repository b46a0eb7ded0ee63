use super::*;

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[test]
fn manual_clock_advances_and_jumps() {
    let clock = ManualClock::starting_at(secs(1.0));
    clock.advance(secs(0.5));
    assert_eq!(clock.now(), secs(1.5));
    clock.set(secs(10.0));
    assert_eq!(clock.now(), secs(10.0));
}

#[test]
fn system_clock_is_monotonic() {
    let clock = SystemClock::new();
    let a = clock.now();
    let b = clock.now();
    assert!(b >= a);
}

#[test]
fn disabled_loop_never_fires() {
    let mut flow = FlowLoop::new();
    assert!(!flow.is_enabled());
    assert_eq!(flow.pending(), None);
    assert_eq!(flow.tick(secs(3.0)), None);
}

#[test]
fn tick_reports_elapsed_since_enable_and_reschedules() {
    let mut flow = FlowLoop::new();
    flow.enable(secs(2.0));
    let first = flow.tick(secs(2.5)).unwrap();
    assert!((first.elapsed - 0.5).abs() < 1e-9);

    let second = flow.tick(secs(4.0)).unwrap();
    assert!((second.elapsed - 2.0).abs() < 1e-9);
    assert_ne!(first.request, second.request);
    assert!(flow.pending().is_some());
}

#[test]
fn disable_cancels_the_pending_request() {
    let mut flow = FlowLoop::new();
    flow.enable(secs(0.0));
    assert!(flow.pending().is_some());
    flow.disable();
    assert_eq!(flow.pending(), None);
    assert_eq!(flow.tick(secs(1.0)), None);
}

#[test]
fn resume_re_anchors_the_time_origin() {
    let mut flow = FlowLoop::new();
    flow.enable(secs(0.0));
    let _ = flow.tick(secs(5.0));
    flow.disable();

    flow.enable(secs(20.0));
    let t = flow.tick(secs(20.25)).unwrap();
    assert!((t.elapsed - 0.25).abs() < 1e-9);
}

#[test]
fn enable_twice_keeps_the_original_origin() {
    let mut flow = FlowLoop::new();
    flow.enable(secs(1.0));
    flow.enable(secs(9.0));
    let t = flow.tick(secs(10.0)).unwrap();
    assert!((t.elapsed - 9.0).abs() < 1e-9);
}

#[test]
fn clock_going_backwards_saturates_at_zero() {
    let mut flow = FlowLoop::new();
    flow.enable(secs(5.0));
    let t = flow.tick(secs(4.0)).unwrap();
    assert_eq!(t.elapsed, 0.0);
}
