//! Threshold evaluation — decides which notifications a run should fire.
//!
//! Pure functions of (current stats, persisted state). The orchestrator
//! owns loading and saving that state and sequencing the notifications;
//! this module only decides.

/// Outcome of comparing the current subscriber count with the persisted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberDecision {
    /// No persisted count yet — record the baseline, notify nothing.
    Baseline,
    /// Count grew since the last run.
    Increased { delta: u64 },
    /// Count is unchanged or lower; decreases get no special handling.
    Unchanged,
}

/// Outcome of checking the view count against the persisted milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneDecision {
    /// The stored threshold that was crossed, when one was.
    pub crossed: Option<u64>,
    /// The threshold to persist for the next run. Always a positive
    /// multiple of the milestone unit, strictly above the view count it
    /// was computed from.
    pub next: u64,
    /// True when no threshold had been recorded before this run.
    pub first_run: bool,
}

/// Smallest multiple of `unit` strictly greater than `view_count`.
pub fn next_threshold(view_count: u64, unit: u64) -> u64 {
    (view_count / unit + 1) * unit
}

/// Compare the current subscriber count against the last persisted one.
pub fn evaluate_subscribers(current: u64, previous: Option<u64>) -> SubscriberDecision {
    match previous {
        None => SubscriberDecision::Baseline,
        Some(previous) if current > previous => SubscriberDecision::Increased {
            delta: current - previous,
        },
        Some(_) => SubscriberDecision::Unchanged,
    }
}

/// Check the current view count against the persisted milestone threshold.
///
/// Crossing is boundary inclusive: a view count exactly equal to the
/// stored threshold fires. The reported milestone is the stored threshold
/// itself, not the live count.
pub fn evaluate_views(
    current: u64,
    previous_threshold: Option<u64>,
    unit: u64,
) -> MilestoneDecision {
    match previous_threshold {
        None => MilestoneDecision {
            crossed: None,
            next: next_threshold(current, unit),
            first_run: true,
        },
        Some(threshold) if current >= threshold => MilestoneDecision {
            crossed: Some(threshold),
            next: next_threshold(current, unit),
            first_run: false,
        },
        Some(threshold) => MilestoneDecision {
            crossed: None,
            next: threshold,
            first_run: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_threshold_rounds_up_to_unit() {
        assert_eq!(next_threshold(23, 10), 30);
        assert_eq!(next_threshold(0, 10), 10);
        assert_eq!(next_threshold(9, 10), 10);
        assert_eq!(next_threshold(999, 1000), 1000);
    }

    #[test]
    fn test_next_threshold_at_exact_multiple_moves_past_it() {
        // 20 is already a multiple; the next milestone must be strictly above
        assert_eq!(next_threshold(20, 10), 30);
        assert_eq!(next_threshold(10, 10), 20);
    }

    #[test]
    fn test_next_threshold_invariants() {
        for view_count in [0u64, 1, 7, 10, 23, 99, 100, 12_345] {
            for unit in [1u64, 10, 100] {
                let next = next_threshold(view_count, unit);
                assert_eq!(next % unit, 0, "must be a multiple of the unit");
                assert!(next > view_count, "must be strictly greater");
                assert!(next > 0, "must be positive");
            }
        }
    }

    #[test]
    fn test_subscriber_first_run_is_baseline() {
        assert_eq!(evaluate_subscribers(100, None), SubscriberDecision::Baseline);
    }

    #[test]
    fn test_subscriber_increase_reports_exact_delta() {
        assert_eq!(
            evaluate_subscribers(105, Some(100)),
            SubscriberDecision::Increased { delta: 5 }
        );
        assert_eq!(
            evaluate_subscribers(101, Some(100)),
            SubscriberDecision::Increased { delta: 1 }
        );
    }

    #[test]
    fn test_subscriber_equal_or_lower_is_unchanged() {
        assert_eq!(evaluate_subscribers(100, Some(100)), SubscriberDecision::Unchanged);
        assert_eq!(evaluate_subscribers(90, Some(100)), SubscriberDecision::Unchanged);
    }

    #[test]
    fn test_views_first_run_records_threshold_without_firing() {
        let decision = evaluate_views(23, None, 10);
        assert_eq!(decision.crossed, None);
        assert_eq!(decision.next, 30);
        assert!(decision.first_run);
    }

    #[test]
    fn test_views_crossing_fires_and_advances() {
        let decision = evaluate_views(31, Some(30), 10);
        assert_eq!(decision.crossed, Some(30), "quotes the stored threshold");
        assert_eq!(decision.next, 40);
        assert!(!decision.first_run);
    }

    #[test]
    fn test_views_boundary_is_inclusive() {
        let decision = evaluate_views(30, Some(30), 10);
        assert_eq!(decision.crossed, Some(30));
        assert_eq!(decision.next, 40);
    }

    #[test]
    fn test_views_below_threshold_leaves_it_unchanged() {
        let decision = evaluate_views(29, Some(30), 10);
        assert_eq!(decision.crossed, None);
        assert_eq!(decision.next, 30);
        assert!(!decision.first_run);
    }

    #[test]
    fn test_views_jump_past_several_milestones_advances_once() {
        // 30 was stored; views jumped to 57 — one notification for 30,
        // next milestone computed from the live count
        let decision = evaluate_views(57, Some(30), 10);
        assert_eq!(decision.crossed, Some(30));
        assert_eq!(decision.next, 60);
    }
}
