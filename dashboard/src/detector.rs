//! Order-count change detection.

/// Outcome of comparing a fresh order count against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderChange {
    /// New orders arrived since the last successful cycle.
    NewOrders { delta: u64 },
    /// First successful fetch with a non-empty order list. Startup-quiet:
    /// never alerts, whatever the count.
    InitialLoad { count: u64 },
    /// Count unchanged.
    Unchanged,
    /// Orders were removed or reset upstream. Not an error, no alert.
    Removed { delta: u64 },
}

impl OrderChange {
    /// Whether this change should trigger the alert chain.
    pub fn should_alert(&self) -> bool {
        matches!(self, Self::NewOrders { .. })
    }
}

/// Classify the transition from `previous` (baseline) to `current`.
///
/// A zero baseline means "no baseline yet", so the first non-empty fetch is
/// always an initial load. A count that dropped to zero therefore also
/// suppresses the alert on the cycle after it refills.
pub fn detect(previous: u64, current: u64) -> OrderChange {
    if previous == 0 && current > 0 {
        OrderChange::InitialLoad { count: current }
    } else if current > previous {
        OrderChange::NewOrders {
            delta: current - previous,
        }
    } else if current < previous {
        OrderChange::Removed {
            delta: previous - current,
        }
    } else {
        OrderChange::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_is_quiet() {
        assert_eq!(detect(0, 5), OrderChange::InitialLoad { count: 5 });
        assert!(!detect(0, 5).should_alert());
    }

    #[test]
    fn growth_alerts_with_delta() {
        assert_eq!(detect(5, 8), OrderChange::NewOrders { delta: 3 });
        assert!(detect(5, 8).should_alert());
    }

    #[test]
    fn unchanged_count_is_a_noop() {
        assert_eq!(detect(8, 8), OrderChange::Unchanged);
        assert_eq!(detect(0, 0), OrderChange::Unchanged);
    }

    #[test]
    fn shrinking_count_never_alerts() {
        assert_eq!(detect(8, 3), OrderChange::Removed { delta: 5 });
        assert!(!detect(8, 3).should_alert());
        assert!(!detect(8, 0).should_alert());
    }

    #[test]
    fn alerts_only_when_baseline_set_and_count_grew() {
        for previous in 0..20u64 {
            for current in 0..20u64 {
                let expected = previous > 0 && current > previous;
                assert_eq!(
                    detect(previous, current).should_alert(),
                    expected,
                    "previous={previous} current={current}"
                );
            }
        }
    }
}
