use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Identity of a registered interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Cancellation handle for a recurring interval.
///
/// Callers must retain the handle for as long as the interval should run and
/// pass it to [`Timers::cancel`] when the owning element leaves the page;
/// there is no other way to stop an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    id: TimerId,
}

impl TimerHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }
}

#[derive(Debug)]
struct Interval {
    period: Duration,
    next_due: Instant,
}

/// Registry of recurring intervals, polled by the page's update pump.
#[derive(Debug, Default)]
pub struct Timers {
    next_id: u64,
    intervals: BTreeMap<TimerId, Interval>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interval firing every `period`, first due at
    /// `now + period`. Zero periods are clamped to one millisecond so a
    /// stalled poll can never spin forever.
    pub fn set_interval(&mut self, period: Duration, now: Instant) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.intervals.insert(
            id,
            Interval {
                period,
                next_due: now + period,
            },
        );
        log::trace!("[timer] interval {id:?} every {period:?}");
        TimerHandle { id }
    }

    /// Remove an interval. Returns false if it was already cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let removed = self.intervals.remove(&handle.id).is_some();
        if removed {
            log::trace!("[timer] interval {:?} cancelled", handle.id);
        }
        removed
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.intervals.contains_key(&handle.id)
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// All firings due by `now`, in deadline order. An interval that is
    /// several periods overdue fires once per elapsed period.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for (&id, interval) in self.intervals.iter_mut() {
            while interval.next_due <= now {
                fired.push((interval.next_due, id));
                interval.next_due += interval.period;
            }
        }
        fired.sort_by_key(|&(due, id)| (due, id));
        fired.into_iter().map(|(_, id)| id).collect()
    }
}
