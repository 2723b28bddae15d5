use serde::{Deserialize, Serialize};

/// A channel's current public statistics. Fetched fresh every run,
/// never persisted directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub subscriber_count: u64,
    pub view_count: u64,
}

/// How the current run was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Periodic invocation by the scheduler; notifications depend on
    /// comparison against persisted state.
    Scheduled,
    /// Operator-initiated invocation; all comparison logic is bypassed and
    /// both notification kinds fire unconditionally.
    Manual,
}

/// Marker value the dispatcher sets in `TRIGGER_EVENT` for operator runs.
pub const MANUAL_TRIGGER_EVENT: &str = "workflow_dispatch";

/// Default granularity of view-count milestones.
pub const DEFAULT_MILESTONE_UNIT: u64 = 10;

impl RunMode {
    /// Derive the run mode from the `TRIGGER_EVENT` environment value.
    /// Only the exact dispatch marker selects manual mode; anything else
    /// (including absence) means a scheduled run.
    pub fn from_trigger_event(event: &str) -> Self {
        if event == MANUAL_TRIGGER_EVENT {
            RunMode::Manual
        } else {
            RunMode::Scheduled
        }
    }

    pub fn is_manual(self) -> bool {
        matches!(self, RunMode::Manual)
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Scheduled => write!(f, "scheduled"),
            RunMode::Manual => write!(f, "manual"),
        }
    }
}

/// Human-readable push notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Short title (e.g., "YouTube view milestone")
    pub title: String,
    /// Detailed body message
    pub body: String,
    /// ntfy tag labels (rendered as emoji by the clients)
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_marker_selects_manual_mode() {
        assert_eq!(
            RunMode::from_trigger_event("workflow_dispatch"),
            RunMode::Manual
        );
        assert!(RunMode::from_trigger_event("workflow_dispatch").is_manual());
    }

    #[test]
    fn test_other_trigger_values_are_scheduled() {
        assert_eq!(RunMode::from_trigger_event(""), RunMode::Scheduled);
        assert_eq!(RunMode::from_trigger_event("schedule"), RunMode::Scheduled);
        assert_eq!(RunMode::from_trigger_event("push"), RunMode::Scheduled);
        // Close-but-wrong values must not trigger manual mode
        assert_eq!(
            RunMode::from_trigger_event("workflow_dispatch "),
            RunMode::Scheduled
        );
    }
}
