//! YouTube Data API v3 client.
//!
//! Two responsibilities with different failure contracts:
//! 1. Channel statistics (`channel_stats`) — the primary fetch. Any HTTP or
//!    parse failure is an error the orchestrator treats as fatal.
//! 2. Watch-time aggregation (`total_watch_time`) — best-effort enrichment.
//!    Failures degrade to partial or absent results, never errors.

use std::time::Duration;

use serde::Deserialize;

use tubewatch_common::error::AppError;
use tubewatch_common::types::ChannelStats;

use crate::duration::{format_watch_time, parse_duration_seconds};

/// The Data API caps playlist pages and video-id batches at 50.
const MAX_BATCH: usize = 50;

/// Client for the YouTube Data API v3.
///
/// The base URL is injected so tests can point at a mock endpoint. Every
/// call carries the API key as a query parameter and runs exactly once —
/// no retries.
pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

// Response models for the endpoints we touch. The Data API returns
// counters as decimal strings, not numbers.

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelItem {
    statistics: Option<ChannelStatistics>,
    content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: String,
    view_count: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    content_details: VideoContentDetails,
}

#[derive(Debug, Deserialize)]
struct VideoContentDetails {
    duration: String,
}

impl YouTubeClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Fetch the channel's current subscriber and view counts.
    ///
    /// Non-2xx status, malformed JSON, an unknown channel id, and a
    /// missing or non-numeric counter are all fetch failures.
    pub async fn channel_stats(&self, channel_id: &str) -> Result<ChannelStats, AppError> {
        let response: ChannelListResponse = self
            .http
            .get(format!("{}/channels", self.base_url))
            .query(&[
                ("part", "statistics"),
                ("id", channel_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let stats = response
            .items
            .into_iter()
            .next()
            .and_then(|item| item.statistics)
            .ok_or_else(|| AppError::Api(format!("channel {channel_id} not found")))?;

        Ok(ChannelStats {
            subscriber_count: parse_count(&stats.subscriber_count, "subscriberCount")?,
            view_count: parse_count(&stats.view_count, "viewCount")?,
        })
    }

    /// Resolve the channel's "uploads" playlist id, if the channel has one.
    pub async fn uploads_playlist(&self, channel_id: &str) -> Result<Option<String>, AppError> {
        let response: ChannelListResponse = self
            .http
            .get(format!("{}/channels", self.base_url))
            .query(&[
                ("part", "contentDetails"),
                ("id", channel_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(|item| item.content_details)
            .and_then(|details| details.related_playlists.uploads))
    }

    /// Collect every video id in a playlist, following `nextPageToken`
    /// until exhausted. A failed page fetch truncates the list silently —
    /// the partial result is accepted.
    pub async fn playlist_video_ids(&self, playlist_id: &str) -> Vec<String> {
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = match self.playlist_page(playlist_id, page_token.as_deref()).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(
                        playlist_id,
                        collected = ids.len(),
                        error = %e,
                        "Playlist page fetch failed, keeping partial result"
                    );
                    break;
                }
            };

            ids.extend(
                page.items
                    .into_iter()
                    .map(|item| item.content_details.video_id),
            );

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        ids
    }

    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsResponse, AppError> {
        let page_size = MAX_BATCH.to_string();
        let mut request = self
            .http
            .get(format!("{}/playlistItems", self.base_url))
            .query(&[
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", page_size.as_str()),
                ("key", self.api_key.as_str()),
            ]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        Ok(request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// Sum the durations of the given videos, in seconds.
    ///
    /// Ids are looked up in batches of 50 (API constraint). A failed batch
    /// contributes 0 and the remaining batches are still processed.
    pub async fn video_duration_seconds(&self, ids: &[String]) -> u64 {
        let mut total = 0u64;

        for batch in ids.chunks(MAX_BATCH) {
            match self.video_batch(batch).await {
                Ok(response) => {
                    total += response
                        .items
                        .iter()
                        .map(|item| parse_duration_seconds(&item.content_details.duration))
                        .sum::<u64>();
                }
                Err(e) => {
                    tracing::warn!(
                        batch_len = batch.len(),
                        error = %e,
                        "Video batch fetch failed, skipping batch"
                    );
                }
            }
        }

        total
    }

    async fn video_batch(&self, ids: &[String]) -> Result<VideoListResponse, AppError> {
        let joined = ids.join(",");
        Ok(self
            .http
            .get(format!("{}/videos", self.base_url))
            .query(&[
                ("part", "contentDetails"),
                ("id", joined.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// Total watch time of every upload on the channel, formatted for
    /// humans ("3 hours 12 minutes").
    ///
    /// `None` when the uploads playlist cannot be resolved or holds no
    /// videos. Failures further down degrade to an undercount instead.
    pub async fn total_watch_time(&self, channel_id: &str) -> Option<String> {
        let playlist_id = match self.uploads_playlist(channel_id).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                tracing::warn!(channel_id, "Channel has no uploads playlist");
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    channel_id,
                    error = %e,
                    "Failed to resolve uploads playlist"
                );
                return None;
            }
        };

        let ids = self.playlist_video_ids(&playlist_id).await;
        if ids.is_empty() {
            tracing::info!(playlist_id, "Uploads playlist is empty");
            return None;
        }

        let seconds = self.video_duration_seconds(&ids).await;
        tracing::info!(videos = ids.len(), seconds, "Aggregated upload durations");
        Some(format_watch_time(seconds))
    }
}

fn parse_count(raw: &str, field: &str) -> Result<u64, AppError> {
    raw.parse()
        .map_err(|_| AppError::Api(format!("{field} is not a number: {raw:?}")))
}
