//! Cancellable periodic regenerate trigger.
//!
//! The handle owns no thread or timer. The caller asks it whether a
//! regeneration is due and sleeps until the next one; cancelling stops all
//! future firings immediately.

use std::time::{Duration, Instant};
use tracing::debug;

/// Shortest accepted interval.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Fixed-interval trigger owned by the caller.
#[derive(Debug, Clone)]
pub struct AutoRegenerate {
    interval: Duration,
    next_due: Option<Instant>,
}

impl AutoRegenerate {
    /// Creates a stopped trigger with the given interval (at least 1 ms).
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            next_due: None,
        }
    }

    /// Interval between firings.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true until [`Self::cancel`] is called.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arms the trigger; the first firing is one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
        debug!(interval_ms = self.interval.as_millis(), "auto regenerate started");
    }

    /// Stops the trigger. No further firings happen.
    pub fn cancel(&mut self) {
        if self.next_due.take().is_some() {
            debug!("auto regenerate cancelled");
        }
    }

    /// Returns true if a regeneration is due at `now`.
    ///
    /// Fires at most once per call and re-arms one interval after the due
    /// time, so a late poll does not shift the schedule. Missed intervals are
    /// skipped rather than replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let elapsed = now.duration_since(due).as_nanos();
        let missed = elapsed / self.interval.as_nanos();
        let skip = u32::try_from(missed + 1).unwrap_or(u32::MAX);
        self.next_due = due
            .checked_add(self.interval.saturating_mul(skip))
            .or_else(|| now.checked_add(self.interval));
        if missed > 0 {
            debug!(missed, "skipped missed intervals");
        }
        true
    }

    /// Time left until the next firing, or `None` when stopped.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

impl Default for AutoRegenerate {
    fn default() -> Self {
        Self::new(crate::constants::AUTO_REGENERATE_INTERVAL)
    }
}
