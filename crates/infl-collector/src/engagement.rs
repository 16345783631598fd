//! Channel engagement from a sample of recent videos.

use infl_core::VideoStats;
use infl_youtube::{YouTubeClient, YouTubeError};

/// `engagement_rate` is a percentage rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Engagement {
    pub engagement_rate: f64,
    pub avg_views_per_video: u64,
}

/// Aggregates per-video counters into a channel-level score.
///
/// `(likes + comments) / views * 100` over the whole sample, and the mean view
/// count rounded half-to-even. Sums saturate at `u64::MAX`. An empty sample
/// or zero total views scores zero.
#[must_use]
pub fn score_engagement(videos: &[VideoStats]) -> Engagement {
    let total_views = videos
        .iter()
        .map(|v| v.views)
        .fold(0u64, u64::saturating_add);
    if videos.is_empty() || total_views == 0 {
        return Engagement::default();
    }

    let interactions = videos
        .iter()
        .map(|v| v.likes.saturating_add(v.comments))
        .fold(0u64, u64::saturating_add);
    let n = u64::try_from(videos.len()).unwrap_or(u64::MAX);

    #[allow(clippy::cast_precision_loss)]
    let rate = interactions as f64 / total_views as f64 * 100.0;

    Engagement {
        engagement_rate: (rate * 100.0).round() / 100.0,
        avg_views_per_video: div_round_half_even(total_views, n),
    }
}

fn div_round_half_even(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let twice = remainder.saturating_mul(2);
    if twice > denominator || (twice == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Fetches up to `sample` recent videos for a channel and scores them.
///
/// Quota errors are retried inside the client; whatever still fails is logged
/// and scored as zero so one bad channel never aborts a collection run.
pub async fn fetch_engagement(client: &YouTubeClient, channel_id: &str, sample: u32) -> Engagement {
    match fetch_video_stats(client, channel_id, sample).await {
        Ok(stats) => score_engagement(&stats),
        Err(e) => {
            tracing::warn!(
                channel_id,
                error = %e,
                "engagement fetch failed; scoring as zero"
            );
            Engagement::default()
        }
    }
}

async fn fetch_video_stats(
    client: &YouTubeClient,
    channel_id: &str,
    sample: u32,
) -> Result<Vec<VideoStats>, YouTubeError> {
    let ids = client.recent_video_ids(channel_id, sample).await?;
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let videos = client.video_statistics(&ids).await?;
    Ok(videos.iter().map(infl_youtube::Video::stats).collect())
}
