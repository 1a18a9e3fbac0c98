// Copy-email feedback
//
// `copied` goes true on every successful clipboard write and back to false
// once the feedback window has elapsed since the most recent write.
//
//   [Idle] ──copied──▶ [Copied] ──window elapsed──▶ [Idle]
//                        │  ▲
//                        └──┘ copied (restarts window)

use super::timer::Deadline;
use std::time::{Duration, Instant};

/// Clipboard-copy feedback state
#[derive(Debug)]
pub struct CopyFeedback {
    copied: bool,
    revert: Deadline,
    window: Duration,
}

impl CopyFeedback {
    pub fn new(window: Duration) -> Self {
        Self {
            copied: false,
            revert: Deadline::new(),
            window,
        }
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    /// A clipboard write succeeded at `now`
    pub fn on_copied(&mut self, now: Instant) {
        self.copied = true;
        self.revert.arm(now, self.window);
    }

    /// Apply the revert if its deadline passed. Returns true on state change.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.revert.fire(now) && self.copied {
            self.copied = false;
            return true;
        }
        false
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.revert.next()
    }

    pub fn cancel(&mut self) {
        self.revert.cancel();
    }
}
