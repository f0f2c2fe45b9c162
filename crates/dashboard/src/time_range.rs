//! Reporting-window selection and history request sequencing.

use clipmore_core::types::TimeRange;

/// Identifies one outstanding history fetch. Tokens are compared against
/// the controller's sequence so that a response for a superseded request
/// can be recognized and discarded even if it resolves later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Tracks the currently selected reporting window and orders the history
/// fetches it triggers. Last writer wins: only the most recently issued
/// request may apply its result.
#[derive(Debug)]
pub struct TimeRangeController {
    current: TimeRange,
    seq: u64,
}

impl TimeRangeController {
    pub fn new(initial: TimeRange) -> Self {
        Self {
            current: initial,
            seq: 0,
        }
    }

    pub fn current(&self) -> TimeRange {
        self.current
    }

    /// Record a new selection and issue a token for the fetch it triggers.
    /// Any token issued earlier is superseded from this point on.
    pub fn begin(&mut self, range: TimeRange) -> RequestToken {
        self.current = range;
        self.seq += 1;
        RequestToken(self.seq)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.seq
    }
}

impl Default for TimeRangeController {
    fn default() -> Self {
        Self::new(TimeRange::default())
    }
}
