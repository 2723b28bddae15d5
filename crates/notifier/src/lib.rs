//! ntfy delivery — posts notification payloads to a pub/sub topic.
//!
//! Delivery is fire-and-forget from the pipeline's point of view: a failed
//! send is logged and reported as `false`, never propagated as an error.

use std::time::Duration;

use serde::Serialize;

use tubewatch_common::error::AppError;
use tubewatch_common::types::NotificationPayload;

/// JSON document ntfy accepts on its publish endpoint.
#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    topic: &'a str,
    message: &'a str,
    title: &'a str,
    tags: &'a [String],
}

/// Client bound to one ntfy topic.
pub struct NtfyNotifier {
    http: reqwest::Client,
    base_url: String,
    topic: String,
}

impl NtfyNotifier {
    pub fn new(
        base_url: impl Into<String>,
        topic: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            topic: topic.into(),
        })
    }

    /// Publish one notification. Returns whether delivery succeeded;
    /// a network error or non-2xx response is logged, not raised.
    pub async fn send(&self, payload: &NotificationPayload) -> bool {
        let request = PublishRequest {
            topic: &self.topic,
            message: &payload.body,
            title: &payload.title,
            tags: &payload.tags,
        };

        let result = self
            .http
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => {
                tracing::info!(topic = %self.topic, title = %payload.title, "Notification sent");
                true
            }
            Err(e) => {
                tracing::warn!(topic = %self.topic, error = %e, "Notification send failed");
                false
            }
        }
    }
}
