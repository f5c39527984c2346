//! Frame requests and repeating timers owned by the host loop.
//!
//! Components never schedule work themselves. They ask the [`Scheduler`]
//! for a handle, keep it, and cancel it on teardown; the host drains due
//! handles every loop iteration and dispatches them back to their owners.

use std::collections::BTreeMap;

/// Handle of a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(u64);

/// Handle of a repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct Interval {
    period_ms: u64,
    next_due_ms: u64,
}

/// Host-side registry of frame requests and repeating timers.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    frames: Vec<FrameId>,
    timers: BTreeMap<TimerId, Interval>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Request a single callback before the next refresh.
    pub fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id());
        self.frames.push(id);
        id
    }

    /// Cancel a frame request. Returns false if it already fired or was cancelled.
    pub fn cancel_frame(&mut self, id: FrameId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|f| *f != id);
        self.frames.len() != before
    }

    /// Drain the pending frame requests; each fires exactly once.
    pub fn take_frames(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.frames)
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Arm a timer firing every `period_ms`, first at `now_ms + period_ms`.
    pub fn set_interval(&mut self, period_ms: u64, now_ms: u64) -> TimerId {
        let period_ms = period_ms.max(1);
        let id = TimerId(self.next_id());
        self.timers.insert(
            id,
            Interval {
                period_ms,
                next_due_ms: now_ms.saturating_add(period_ms),
            },
        );
        id
    }

    /// Cancel a timer. Returns false if it was not active.
    pub fn clear_interval(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Timers due at `now_ms`, ordered by due time.
    ///
    /// A timer fires at most once per call; one that fell more than a period
    /// behind skips the missed periods.
    pub fn due_timers(&mut self, now_ms: u64) -> Vec<TimerId> {
        let mut due: Vec<(u64, TimerId)> = Vec::new();
        for (id, interval) in self.timers.iter_mut() {
            if interval.next_due_ms > now_ms {
                continue;
            }
            due.push((interval.next_due_ms, *id));
            let next = interval.next_due_ms.saturating_add(interval.period_ms);
            interval.next_due_ms = if next <= now_ms {
                now_ms.saturating_add(interval.period_ms)
            } else {
                next
            };
        }
        due.sort_unstable();
        due.into_iter().map(|(_, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_requests_fire_once() {
        let mut s = Scheduler::new();
        let a = s.request_frame();
        let b = s.request_frame();
        assert!(s.cancel_frame(a));
        assert!(!s.cancel_frame(a));
        assert_eq!(s.take_frames(), vec![b]);
        assert!(s.take_frames().is_empty());
        assert_eq!(s.pending_frames(), 0);
    }

    #[test]
    fn test_interval_fires_each_period() {
        let mut s = Scheduler::new();
        let id = s.set_interval(100, 0);
        assert!(s.due_timers(99).is_empty());
        assert_eq!(s.due_timers(100), vec![id]);
        assert!(s.due_timers(150).is_empty());
        assert_eq!(s.due_timers(200), vec![id]);
    }

    #[test]
    fn test_interval_skips_missed_periods() {
        let mut s = Scheduler::new();
        let id = s.set_interval(100, 0);
        assert_eq!(s.due_timers(1000), vec![id]);
        assert!(s.due_timers(1050).is_empty());
        assert_eq!(s.due_timers(1100), vec![id]);
    }

    #[test]
    fn test_cleared_interval_never_fires() {
        let mut s = Scheduler::new();
        let id = s.set_interval(10, 0);
        assert!(s.clear_interval(id));
        assert!(!s.clear_interval(id));
        assert!(s.due_timers(1000).is_empty());
        assert_eq!(s.active_timers(), 0);
    }

    #[test]
    fn test_due_timers_ordered_by_due_time() {
        let mut s = Scheduler::new();
        let slow = s.set_interval(50, 0);
        let fast = s.set_interval(30, 0);
        assert_eq!(s.due_timers(60), vec![fast, slow]);
    }
}
