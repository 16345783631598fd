//! Trend analysis over the `YouTube` most-popular chart.

use chrono::Utc;
use infl_youtube::{TrendingQuery, YouTubeClient};

use crate::error::TrendError;
use crate::extract::{extract_hashtags, extract_keywords, TrendingVideo};
use crate::report::TrendReport;

/// `videoCategoryId` of the Music category.
pub const MUSIC_CATEGORY_ID: &str = "10";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendOptions {
    pub region_code: String,
    pub language: String,
    pub max_videos: u32,
    pub max_music: u32,
    pub keyword_min_count: u64,
    pub top_hashtags: usize,
    pub top_keywords: usize,
}

impl Default for TrendOptions {
    fn default() -> Self {
        Self {
            region_code: "IN".to_string(),
            language: "ta".to_string(),
            max_videos: 50,
            max_music: 30,
            keyword_min_count: 2,
            top_hashtags: 20,
            top_keywords: 30,
        }
    }
}

/// Fetches the general and music charts and counts hashtags and keywords in
/// the general chart.
///
/// A failed music fetch is logged and leaves `trending_music` empty.
///
/// # Errors
///
/// Returns [`TrendError::YouTube`] if the general chart cannot be fetched.
pub async fn analyze(client: &YouTubeClient, opts: &TrendOptions) -> Result<TrendReport, TrendError> {
    let videos = client
        .trending_videos(&TrendingQuery {
            region_code: opts.region_code.clone(),
            language: opts.language.clone(),
            category_id: None,
            max_results: opts.max_videos,
        })
        .await?;
    let trending_videos: Vec<TrendingVideo> = videos.iter().map(TrendingVideo::from).collect();

    let trending_music = match client
        .trending_videos(&TrendingQuery {
            region_code: opts.region_code.clone(),
            language: opts.language.clone(),
            category_id: Some(MUSIC_CATEGORY_ID.to_string()),
            max_results: opts.max_music,
        })
        .await
    {
        Ok(music) => music.iter().map(TrendingVideo::from).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "trending music fetch failed");
            Vec::new()
        }
    };

    let mut trending_hashtags = extract_hashtags(&trending_videos);
    trending_hashtags.truncate(opts.top_hashtags);
    let mut trending_keywords = extract_keywords(&trending_videos, opts.keyword_min_count);
    trending_keywords.truncate(opts.top_keywords);

    tracing::info!(
        region = %opts.region_code,
        videos = trending_videos.len(),
        music = trending_music.len(),
        hashtags = trending_hashtags.len(),
        keywords = trending_keywords.len(),
        "trend analysis complete"
    );

    Ok(TrendReport {
        trending_videos,
        trending_music,
        trending_hashtags,
        trending_keywords,
        generated_at: Utc::now(),
    })
}
