use karst_types::{Shared, StdError, StdResult};

struct GasTrackerInner {
    limit: Option<u64>,
    used: u64,
}

/// Tracks the gas budget of one call.
///
/// Cheaply clonable; clones share the same budget, which is how the budget
/// follows a call through the engine. Each bridged static call gets its own
/// tracker, so budgets are never shared across concurrent calls.
#[derive(Clone)]
pub struct GasTracker {
    inner: Shared<GasTrackerInner>,
}

impl GasTracker {
    /// Create a gas tracker without a limit.
    pub fn new_limitless() -> Self {
        Self {
            inner: Shared::new(GasTrackerInner {
                limit: None,
                used: 0,
            }),
        }
    }

    /// Create a gas tracker with the given limit.
    pub fn new_limited(limit: u64) -> Self {
        Self {
            inner: Shared::new(GasTrackerInner {
                limit: Some(limit),
                used: 0,
            }),
        }
    }

    /// The tracker's limit. `None` if limitless.
    pub fn limit(&self) -> Option<u64> {
        self.inner.read_with(|inner| inner.limit)
    }

    /// The amount of gas already used.
    pub fn used(&self) -> u64 {
        self.inner.read_with(|inner| inner.used)
    }

    /// The amount of gas still available. `None` if limitless.
    pub fn remaining(&self) -> Option<u64> {
        self.inner
            .read_with(|inner| inner.limit.map(|limit| limit - inner.used))
    }

    /// Consume the given amount of gas. Error if the limit is exceeded.
    pub fn consume(&self, consumed: u64, comment: &'static str) -> StdResult<()> {
        self.inner.write_with(|mut inner| {
            let used = inner.used.saturating_add(consumed);

            if let Some(limit) = inner.limit {
                if used > limit {
                    // Clamp at the limit: the budget is spent, and reporting
                    // more gas used than the limit would confuse callers.
                    inner.used = limit;

                    return Err(StdError::OutOfGas {
                        limit,
                        used,
                        comment,
                    });
                }
            }

            inner.used = used;

            Ok(())
        })
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limited_tracker_enforces_limit() {
        let tracker = GasTracker::new_limited(100);
        assert_eq!(tracker.limit(), Some(100));
        assert_eq!(tracker.remaining(), Some(100));

        tracker.consume(40, "step 1").unwrap();
        assert_eq!(tracker.used(), 40);
        assert_eq!(tracker.remaining(), Some(60));

        let err = tracker.consume(61, "step 2").unwrap_err();
        assert!(matches!(err, StdError::OutOfGas { limit: 100, .. }));

        // The budget is spent, but never reported above the limit.
        assert_eq!(tracker.used(), 100);
        assert_eq!(tracker.remaining(), Some(0));
    }

    #[test]
    fn limitless_tracker_never_errors() {
        let tracker = GasTracker::new_limitless();
        assert_eq!(tracker.limit(), None);
        assert_eq!(tracker.remaining(), None);

        tracker.consume(u64::MAX, "a lot").unwrap();
        tracker.consume(u64::MAX, "even more").unwrap();
        assert_eq!(tracker.used(), u64::MAX);
    }

    #[test]
    fn clones_share_one_budget() {
        let tracker = GasTracker::new_limited(100);
        let clone = tracker.clone();

        clone.consume(70, "via clone").unwrap();

        assert_eq!(tracker.used(), 70);
        assert!(tracker.consume(40, "via original").is_err());
    }
}
