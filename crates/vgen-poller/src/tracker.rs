//! Consecutive not-found tracking.

/// Tracks consecutive not-found responses for a single job.
///
/// Owned by the job's poll task and discarded with it; a new submission
/// starts from zero. Any successful status response resets the count.
#[derive(Debug)]
pub struct NotFoundTracker {
    consecutive: u32,
    threshold: u32,
}

impl NotFoundTracker {
    /// Create a tracker with the given threshold.
    pub fn new(threshold: u32) -> Self {
        Self {
            consecutive: 0,
            threshold,
        }
    }

    /// Record a successful status response (resets the count).
    pub fn record_success(&mut self) {
        self.consecutive = 0;
    }

    /// Record a not-found response.
    ///
    /// Returns `true` exactly when this response makes the count reach
    /// the threshold, i.e. when the caller should downgrade its cadence.
    pub fn record_not_found(&mut self) -> bool {
        self.consecutive += 1;
        self.consecutive == self.threshold
    }

    /// Check whether the threshold has been reached.
    pub fn threshold_reached(&self) -> bool {
        self.consecutive >= self.threshold
    }

    /// Get the current consecutive not-found count.
    pub fn count(&self) -> u32 {
        self.consecutive
    }
}
