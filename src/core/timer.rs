//! Deterministic timer queue.
//!
//! Timers are keyed by an absolute deadline measured from an arbitrary epoch
//! (the page's start).  Nothing in here reads a wall clock: callers pass the
//! current time in, which is what lets the reveal logic run against a fake
//! clock in tests.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

// ───────────────────────────────────────── types ─────────────

/// Handle returned by [`TimerQueue::schedule`].  Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Fire-once or repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Once(Duration),
    Every(Duration),
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub id: TimerId,
    /// The deadline it was scheduled for (not the time it was polled at).
    pub at: Duration,
    pub payload: T,
}

#[derive(Debug)]
struct Entry<T> {
    payload: T,
    /// `Some` for repeating timers.
    period: Option<Duration>,
}

// ───────────────────────────────────────── queue ─────────────

/// Ordered set of pending timers.
///
/// Timers with equal deadlines fire in the order they were scheduled.
#[derive(Debug)]
pub struct TimerQueue<T> {
    /// (deadline, id) → entry.  `TimerId`s grow monotonically, so the key
    /// order doubles as insertion order for equal deadlines.
    queue: BTreeMap<(Duration, TimerId), Entry<T>>,
    /// id → current deadline, for O(log n) cancellation.
    deadlines: HashMap<TimerId, Duration>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` relative to `now`.
    ///
    /// A repeating timer with a zero period would spin forever inside a single
    /// poll, so the period is bumped to one millisecond.
    pub fn schedule(&mut self, now: Duration, schedule: Schedule, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let (delay, period) = match schedule {
            Schedule::Once(d) => (d, None),
            Schedule::Every(p) => {
                let p = p.max(Duration::from_millis(1));
                (p, Some(p))
            }
        };
        let deadline = now + delay;
        self.queue.insert((deadline, id), Entry { payload, period });
        self.deadlines.insert(id, deadline);
        id
    }

    /// Remove a timer.  Returns `false` if it already fired (fire-once) or was
    /// cancelled before, so double-cancel is harmless.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.queue.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    /// Pop the earliest timer whose deadline is `<= until`.
    ///
    /// Repeating timers are re-armed at `deadline + period` before returning,
    /// so polling in a loop up to `until` yields every missed tick in order.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<T>> {
        let (&(deadline, id), _) = self.queue.iter().next()?;
        if deadline > until {
            return None;
        }
        let entry = self.queue.remove(&(deadline, id))?;
        match entry.period {
            Some(period) => {
                let next = deadline + period;
                self.deadlines.insert(id, next);
                self.queue.insert(
                    (next, id),
                    Entry {
                        payload: entry.payload.clone(),
                        period: Some(period),
                    },
                );
            }
            None => {
                self.deadlines.remove(&id);
            }
        }
        Some(Fired {
            id,
            at: deadline,
            payload: entry.payload,
        })
    }

    /// Earliest pending deadline, if any.
    #[cfg(test)]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(d, _)| *d)
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn once_fires_at_deadline_and_not_before() {
        let mut q = TimerQueue::new();
        let id = q.schedule(ms(100), Schedule::Once(ms(200)), "a");
        assert!(q.pop_due(ms(299)).is_none());
        let fired = q.pop_due(ms(300)).unwrap();
        assert_eq!(fired.id, id);
        assert_eq!(fired.at, ms(300));
        assert_eq!(q.pending(), 0);
        assert!(!q.is_pending(id));
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(0), Schedule::Once(ms(50)), 1);
        q.schedule(ms(0), Schedule::Once(ms(50)), 2);
        q.schedule(ms(0), Schedule::Once(ms(10)), 0);
        let order: Vec<i32> = std::iter::from_fn(|| q.pop_due(ms(50)).map(|f| f.payload)).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn repeating_timer_yields_every_missed_tick() {
        let mut q = TimerQueue::new();
        let id = q.schedule(ms(0), Schedule::Every(ms(500)), ());
        let ticks: Vec<Duration> = std::iter::from_fn(|| q.pop_due(ms(1600)).map(|f| f.at)).collect();
        assert_eq!(ticks, vec![ms(500), ms(1000), ms(1500)]);
        assert!(q.is_pending(id));
        assert_eq!(q.next_deadline(), Some(ms(2000)));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = TimerQueue::new();
        let id = q.schedule(ms(0), Schedule::Every(ms(10)), ());
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(q.pop_due(ms(1000)).is_none());
    }

    #[test]
    fn cancel_after_fire_once_reports_false() {
        let mut q = TimerQueue::new();
        let id = q.schedule(ms(0), Schedule::Once(ms(0)), ());
        assert!(q.pop_due(ms(0)).is_some());
        assert!(!q.cancel(id));
    }
}
