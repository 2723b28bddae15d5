//! One monitoring run: fetch → evaluate → notify → persist.
//!
//! The pipeline is fully sequential. Only two failures abort it (the
//! caller maps them to exit code 1): missing configuration, handled
//! before this module runs, and a failed primary stats fetch. Everything
//! downstream (watch-time enrichment, notification delivery) degrades
//! with a log line and the run still persists its state.

use std::time::Duration;

use tubewatch_common::config::AppConfig;
use tubewatch_common::state::{FileSlot, StateSlot};
use tubewatch_common::types::{ChannelStats, RunMode};
use tubewatch_engine::evaluator::{self, SubscriberDecision};
use tubewatch_engine::message;
use tubewatch_notifier::NtfyNotifier;
use tubewatch_youtube::YouTubeClient;

/// Execute a single run end to end.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let timeout = Duration::from_secs(config.http_timeout_secs);
    let youtube = YouTubeClient::new(&config.youtube_api_base, &config.api_key, timeout)?;
    let notifier = NtfyNotifier::new(&config.ntfy_base_url, &config.ntfy_topic, timeout)?;

    // Primary fetch — the only network failure that aborts the run.
    // Nothing has been persisted at this point.
    let stats = youtube.channel_stats(&config.channel_id).await?;
    tracing::info!(
        subscribers = stats.subscriber_count,
        views = stats.view_count,
        mode = %config.run_mode,
        "Fetched channel statistics"
    );

    let subscriber_slot = FileSlot::new(&config.subscriber_state_path);
    let milestone_slot = FileSlot::new(&config.milestone_state_path);

    match config.run_mode {
        RunMode::Manual => {
            manual_run(config, &youtube, &notifier, stats).await;
        }
        RunMode::Scheduled => {
            scheduled_run(config, &notifier, stats, &subscriber_slot, &milestone_slot).await?;
        }
    }

    // The subscriber count is saved on both paths; the milestone slot is
    // only touched by the scheduled branch above.
    subscriber_slot.save(stats.subscriber_count)?;
    tracing::info!(
        count = stats.subscriber_count,
        "Saved current subscriber count"
    );

    Ok(())
}

/// Operator-initiated run: skip all comparisons and fire both
/// notification kinds with live values.
async fn manual_run(
    config: &AppConfig,
    youtube: &YouTubeClient,
    notifier: &NtfyNotifier,
    stats: ChannelStats,
) {
    tracing::info!("Manual run: sending unconditional notifications");

    notifier
        .send(&message::subscriber_notification(
            stats.subscriber_count,
            None,
        ))
        .await;

    // The milestone message reports the live view count itself, enriched
    // with total watch time when the aggregation resolves.
    let watch_time = youtube.total_watch_time(&config.channel_id).await;
    if watch_time.is_none() {
        tracing::warn!("Watch time unavailable, milestone message goes out without it");
    }
    notifier
        .send(&message::milestone_notification(
            stats.view_count,
            watch_time.as_deref(),
        ))
        .await;
}

/// Scheduled run: notify only on actual threshold crossings and advance
/// the persisted milestone.
async fn scheduled_run(
    config: &AppConfig,
    notifier: &NtfyNotifier,
    stats: ChannelStats,
    subscriber_slot: &FileSlot,
    milestone_slot: &FileSlot,
) -> anyhow::Result<()> {
    match evaluator::evaluate_subscribers(stats.subscriber_count, subscriber_slot.load()) {
        SubscriberDecision::Baseline => {
            tracing::info!("First run: recording subscriber baseline");
        }
        SubscriberDecision::Increased { delta } => {
            tracing::info!(delta, "Subscriber count increased");
            notifier
                .send(&message::subscriber_notification(
                    stats.subscriber_count,
                    Some(delta),
                ))
                .await;
        }
        SubscriberDecision::Unchanged => {
            tracing::info!("No subscriber change");
        }
    }

    let decision = evaluator::evaluate_views(
        stats.view_count,
        milestone_slot.load(),
        config.milestone_unit,
    );
    if decision.first_run {
        tracing::info!(next = decision.next, "First run: recording view milestone");
    }
    if let Some(milestone) = decision.crossed {
        tracing::info!(milestone, next = decision.next, "View milestone crossed");
        notifier
            .send(&message::milestone_notification(milestone, None))
            .await;
    } else if !decision.first_run {
        tracing::info!(next = decision.next, "View milestone not reached");
    }

    milestone_slot.save(decision.next)?;
    Ok(())
}
