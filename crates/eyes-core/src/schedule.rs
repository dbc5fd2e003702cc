//! Cancellable interval timers.
//!
//! Front-ends own the actual timer mechanism; the scene only ever holds one
//! [`ScheduledTask`] handle and always cancels it before starting another.

use fnv::FnvHashMap;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

pub trait IntervalScheduler {
    /// Start a repeating timer. `None` means the platform refused it.
    fn start_interval(&mut self, period_ms: u32) -> Option<TimerId>;
    fn cancel(&mut self, id: TimerId);
}

/// Handle to at most one running interval.
#[derive(Debug, Default)]
pub struct ScheduledTask {
    current: Option<TimerId>,
    period_ms: u32,
}

impl ScheduledTask {
    #[inline]
    pub fn id(&self) -> Option<TimerId> {
        self.current
    }

    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    #[inline]
    pub fn is_current(&self, id: TimerId) -> bool {
        self.current == Some(id)
    }

    /// Cancel the running interval (if any), then start a new one.
    pub fn reschedule<S: IntervalScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        period_ms: u32,
    ) -> Option<TimerId> {
        self.cancel(scheduler);
        self.current = scheduler.start_interval(period_ms);
        self.period_ms = period_ms;
        self.current
    }

    pub fn cancel<S: IntervalScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.current.take() {
            scheduler.cancel(id);
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PolledEntry {
    period_ms: u64,
    next_due_ms: u64,
}

/// Interval scheduler driven by an external clock, for front-ends that poll
/// once per frame instead of receiving timer callbacks.
#[derive(Debug, Default)]
pub struct PolledIntervals {
    next_id: u32,
    now_ms: u64,
    entries: FnvHashMap<TimerId, PolledEntry>,
}

impl PolledIntervals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    pub fn active_ids(&self) -> Vec<TimerId> {
        let mut ids: Vec<TimerId> = self.entries.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Advance the clock and collect timers that came due. A timer that fell
    /// several periods behind fires once and is re-armed from `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> SmallVec<[TimerId; 2]> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;
        let mut fired = SmallVec::new();
        for (id, entry) in self.entries.iter_mut() {
            if entry.next_due_ms <= now {
                fired.push(*id);
                entry.next_due_ms = now + entry.period_ms;
            }
        }
        fired.sort();
        fired
    }
}

impl IntervalScheduler for PolledIntervals {
    fn start_interval(&mut self, period_ms: u32) -> Option<TimerId> {
        self.next_id = self.next_id.wrapping_add(1);
        let id = TimerId(self.next_id);
        let period_ms = u64::from(period_ms.max(1));
        self.entries.insert(
            id,
            PolledEntry {
                period_ms,
                next_due_ms: self.now_ms + period_ms,
            },
        );
        Some(id)
    }

    fn cancel(&mut self, id: TimerId) {
        self.entries.remove(&id);
    }
}
