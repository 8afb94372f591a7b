use std::time::{Duration, Instant};

use pagedom::Timers;

const PERIOD: Duration = Duration::from_millis(5000);

// =============================================================================
// Firing
// =============================================================================

#[test]
fn test_interval_not_due_before_period() {
    let mut timers = Timers::new();
    let t0 = Instant::now();
    timers.set_interval(PERIOD, t0);

    assert!(timers.poll(t0).is_empty());
    assert!(timers.poll(t0 + PERIOD - Duration::from_millis(1)).is_empty());
}

#[test]
fn test_interval_fires_each_period() {
    let mut timers = Timers::new();
    let t0 = Instant::now();
    let handle = timers.set_interval(PERIOD, t0);

    assert_eq!(timers.poll(t0 + PERIOD), vec![handle.id()]);
    assert!(timers.poll(t0 + PERIOD).is_empty());
    assert_eq!(timers.poll(t0 + 2 * PERIOD), vec![handle.id()]);
}

#[test]
fn test_overdue_interval_catches_up() {
    let mut timers = Timers::new();
    let t0 = Instant::now();
    let handle = timers.set_interval(PERIOD, t0);

    // Three and a half periods late: three firings owed.
    let fired = timers.poll(t0 + 3 * PERIOD + PERIOD / 2);
    assert_eq!(fired, vec![handle.id(); 3]);
}

#[test]
fn test_multiple_intervals_fire_in_deadline_order() {
    let mut timers = Timers::new();
    let t0 = Instant::now();
    let slow = timers.set_interval(Duration::from_millis(300), t0);
    let fast = timers.set_interval(Duration::from_millis(100), t0);

    let fired = timers.poll(t0 + Duration::from_millis(300));
    assert_eq!(
        fired,
        vec![fast.id(), fast.id(), slow.id(), fast.id()],
    );
}

// =============================================================================
// Cancellation
// =============================================================================

#[test]
fn test_cancel_stops_firing() {
    let mut timers = Timers::new();
    let t0 = Instant::now();
    let handle = timers.set_interval(PERIOD, t0);

    assert!(timers.is_active(handle));
    assert!(timers.cancel(handle));
    assert!(!timers.is_active(handle));
    assert!(timers.is_empty());
    assert!(timers.poll(t0 + 10 * PERIOD).is_empty());

    // Second cancel reports nothing to do.
    assert!(!timers.cancel(handle));
}

#[test]
fn test_zero_period_is_clamped() {
    let mut timers = Timers::new();
    let t0 = Instant::now();
    let handle = timers.set_interval(Duration::ZERO, t0);

    // Must terminate and fire a bounded number of times.
    let fired = timers.poll(t0 + Duration::from_millis(3));
    assert_eq!(fired, vec![handle.id(); 3]);
}
