//! Notification message construction for both threshold kinds.

use tubewatch_common::types::NotificationPayload;

/// Render `n` with `,` thousands separators.
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Payload for a subscriber-count notification.
///
/// `delta` is present on the scheduled path (current − previous) and
/// absent on manual runs, which report the live count as-is.
pub fn subscriber_notification(current: u64, delta: Option<u64>) -> NotificationPayload {
    let body = match delta {
        Some(delta) => format!(
            "Subscribers up by {}! Now at {}.",
            group_digits(delta),
            group_digits(current)
        ),
        None => format!("Currently at {} subscribers.", group_digits(current)),
    };

    NotificationPayload {
        title: "YouTube subscribers up".to_string(),
        body,
        tags: vec!["tada".to_string(), "youtube".to_string()],
    }
}

/// Payload for a view-count milestone notification.
///
/// Quotes the milestone that was crossed (the stored threshold on
/// scheduled runs, the live view count on manual runs), plus the
/// channel's total watch time when the aggregation resolved.
pub fn milestone_notification(milestone: u64, watch_time: Option<&str>) -> NotificationPayload {
    let mut body = format!("Total views reached {}!", group_digits(milestone));
    if let Some(watch_time) = watch_time {
        body.push_str(&format!(" Cumulative watch time: {watch_time}."));
    }

    NotificationPayload {
        title: "YouTube view milestone".to_string(),
        body,
        tags: vec!["trophy".to_string(), "youtube".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(1), "1");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(1_234), "1,234");
        assert_eq!(group_digits(12_845), "12,845");
        assert_eq!(group_digits(1_234_567), "1,234,567");
    }

    #[test]
    fn test_subscriber_notification_with_delta() {
        let payload = subscriber_notification(12_845, Some(1_205));
        assert_eq!(payload.title, "YouTube subscribers up");
        assert!(payload.body.contains("1,205"));
        assert!(payload.body.contains("12,845"));
        assert_eq!(payload.tags, vec!["tada", "youtube"]);
    }

    #[test]
    fn test_subscriber_notification_manual_has_no_delta() {
        let payload = subscriber_notification(500, None);
        assert!(payload.body.contains("500"));
        assert!(!payload.body.contains("up by"));
    }

    #[test]
    fn test_milestone_notification_quotes_milestone() {
        let payload = milestone_notification(982_320, None);
        assert_eq!(payload.title, "YouTube view milestone");
        assert!(payload.body.contains("982,320"));
        assert!(!payload.body.contains("watch time"));
        assert_eq!(payload.tags, vec!["trophy", "youtube"]);
    }

    #[test]
    fn test_milestone_notification_with_watch_time() {
        let payload = milestone_notification(100, Some("1 hour 2 minutes"));
        assert!(payload.body.contains("100"));
        assert!(payload.body.contains("1 hour 2 minutes"));
    }
}
