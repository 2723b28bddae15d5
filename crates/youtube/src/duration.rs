//! ISO-8601 duration handling for the `PT[nH][nM][nS]` subset the Data API
//! emits as video lengths.

use std::sync::LazyLock;

use regex::Regex;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("valid duration pattern")
});

/// Parse an ISO-8601 video duration into whole seconds.
///
/// Any component may be absent (absent = 0). A string that does not match
/// the pattern at all parses to 0, not an error.
pub fn parse_duration_seconds(raw: &str) -> u64 {
    let Some(captures) = DURATION_RE.captures(raw.trim()) else {
        return 0;
    };

    let component = |i: usize| -> u64 {
        captures
            .get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    component(1) * 3600 + component(2) * 60 + component(3)
}

/// Format a second count as "H hours M minutes", omitting the hour segment
/// when it is zero. Leftover seconds are truncated.
pub fn format_watch_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;

    let minute_part = format!("{} minute{}", minutes, plural(minutes));
    if hours == 0 {
        minute_part
    } else {
        format!("{} hour{} {}", hours, plural(hours), minute_part)
    }
}

fn plural(n: u64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
