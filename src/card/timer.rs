// One-shot deadlines for auto-reverting UI state
//
// A `Deadline` is a single slot: arming it again replaces the pending
// deadline, so an older schedule can never fire after a newer one was set.
// The event loop asks the owner for `next()` to know when to wake up, then
// calls `fire(now)`, which reports true at most once per arm.

use std::time::{Duration, Instant};

/// A cancellable one-shot deadline
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the deadline `after` from `now`, replacing any pending one
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.at = Some(now + after);
    }

    /// Drop the pending deadline without firing
    pub fn cancel(&mut self) {
        self.at = None;
    }

    /// When the pending deadline expires, if any
    pub fn next(&self) -> Option<Instant> {
        self.at
    }

    /// Fire if the deadline has passed. Disarms on fire.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_unarmed_never_fires() {
        let mut d = Deadline::new();
        assert_eq!(d.next(), None);
        assert!(!d.fire(Instant::now() + ms(60_000)));
    }

    #[test]
    fn test_fires_once_at_deadline() {
        let t0 = Instant::now();
        let mut d = Deadline::new();
        d.arm(t0, ms(2000));

        assert!(!d.fire(t0 + ms(1999)));
        assert!(d.fire(t0 + ms(2000)));
        // Already fired: later polls are no-ops
        assert!(!d.fire(t0 + ms(2500)));
        assert_eq!(d.next(), None);
    }

    #[test]
    fn test_rearm_replaces_pending() {
        let t0 = Instant::now();
        let mut d = Deadline::new();
        d.arm(t0, ms(2000));
        d.arm(t0 + ms(1000), ms(2000));

        assert_eq!(d.next(), Some(t0 + ms(3000)));
        assert!(!d.fire(t0 + ms(2000)));
        assert!(d.fire(t0 + ms(3000)));
    }

    #[test]
    fn test_cancel_suppresses_fire() {
        let t0 = Instant::now();
        let mut d = Deadline::new();
        d.arm(t0, ms(10));
        d.cancel();
        assert_eq!(d.next(), None);
        assert!(!d.fire(t0 + ms(100)));
    }
}
