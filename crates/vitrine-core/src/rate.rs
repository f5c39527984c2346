//! Debounce and throttle helpers for bursty input.

/// Collapses a burst of triggers into one trailing value.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay_ms: u64,
    pending: Option<(u64, T)>,
}

impl<T> Debounce<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Record a new value, restarting the delay.
    pub fn trigger(&mut self, now_ms: u64, value: T) {
        self.pending = Some((now_ms.saturating_add(self.delay_ms), value));
    }

    /// Take the last value once the delay since the last trigger has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if deadline <= now_ms => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Admits at most one call per interval, on the leading edge.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl Throttle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    pub fn ready(&mut self, now_ms: u64) -> bool {
        match self.last_ms {
            Some(last) if now_ms.saturating_sub(last) < self.interval_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_keeps_last_value() {
        let mut d = Debounce::new(250);
        d.trigger(0, 1);
        d.trigger(100, 2);
        d.trigger(200, 3);
        assert_eq!(d.poll(300), None);
        assert_eq!(d.poll(450), Some(3));
        assert_eq!(d.poll(1000), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_throttle_limits_rate() {
        let mut t = Throttle::new(16);
        assert!(t.ready(0));
        assert!(!t.ready(10));
        assert!(t.ready(16));
        assert!(!t.ready(31));
        assert!(t.ready(40));
    }
}
