use serde::Deserialize;

use crate::types::{DEFAULT_MILESTONE_UNIT, RunMode};

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// YouTube Data API key
    pub api_key: String,

    /// ntfy topic that receives the push notifications
    pub ntfy_topic: String,

    /// How this run was triggered (scheduled timer vs. operator dispatch)
    pub run_mode: RunMode,

    /// Channel whose statistics are monitored
    pub channel_id: String,

    /// YouTube Data API base URL (overridable to point tests at a mock)
    pub youtube_api_base: String,

    /// ntfy publish endpoint
    pub ntfy_base_url: String,

    /// File holding the last observed subscriber count
    pub subscriber_state_path: String,

    /// File holding the next view-count milestone
    pub milestone_state_path: String,

    /// Granularity of view-count milestones (default: 10)
    pub milestone_unit: u64,

    /// Timeout applied to every outbound HTTP call, in seconds (default: 30)
    pub http_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let milestone_unit: u64 = std::env::var("VIEW_MILESTONE_UNIT")
            .unwrap_or_else(|_| DEFAULT_MILESTONE_UNIT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("VIEW_MILESTONE_UNIT must be a valid u64"))?;
        if milestone_unit == 0 {
            return Err(anyhow::anyhow!("VIEW_MILESTONE_UNIT must be positive"));
        }

        Ok(Self {
            api_key: std::env::var("YOUTUBE_API_KEY")
                .map_err(|_| anyhow::anyhow!("YOUTUBE_API_KEY environment variable is required"))?,
            ntfy_topic: std::env::var("NTFY_TOPIC")
                .map_err(|_| anyhow::anyhow!("NTFY_TOPIC environment variable is required"))?,
            run_mode: RunMode::from_trigger_event(
                &std::env::var("TRIGGER_EVENT").unwrap_or_default(),
            ),
            channel_id: std::env::var("CHANNEL_ID")
                .unwrap_or_else(|_| "UC-f98IWFB5drYTG5FFeP1MQ".to_string()),
            youtube_api_base: std::env::var("YOUTUBE_API_BASE_URL")
                .unwrap_or_else(|_| "https://www.googleapis.com/youtube/v3".to_string()),
            ntfy_base_url: std::env::var("NTFY_URL")
                .unwrap_or_else(|_| "https://ntfy.sh".to_string()),
            subscriber_state_path: std::env::var("SUBSCRIBER_STATE_FILE")
                .unwrap_or_else(|_| "subscriber_count.txt".to_string()),
            milestone_state_path: std::env::var("MILESTONE_STATE_FILE")
                .unwrap_or_else(|_| "view_milestone.txt".to_string()),
            milestone_unit,
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a valid u64"))?,
        })
    }
}
