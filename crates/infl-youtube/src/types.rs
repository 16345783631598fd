//! `YouTube` Data API v3 response types.
//!
//! Only the fields the collector and trend analysis read are modelled. The
//! API reports all statistics as decimal strings; [`de_count`] accepts either
//! a string or a number and falls back to `0` for anything unparsable.

use infl_core::VideoStats;
use serde::{Deserialize, Deserializer};

/// Envelope shared by every `*.list` endpoint.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

// ---------------------------------------------------------------------------
// search.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: ResourceId,
    #[serde(default)]
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchSnippet {
    pub title: String,
    pub channel_title: String,
}

/// A channel returned by a category search, before its details are fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCandidate {
    pub channel_id: String,
    pub title: String,
}

// ---------------------------------------------------------------------------
// channels.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub snippet: ChannelSnippet,
    #[serde(default)]
    pub statistics: ChannelStatistics,
    #[serde(default)]
    pub branding_settings: Option<BrandingSettings>,
}

impl Channel {
    /// Best available thumbnail: `high`, then `medium`, then `default`.
    #[must_use]
    pub fn thumbnail_url(&self) -> String {
        self.snippet.thumbnails.best_url().unwrap_or_default()
    }

    /// Country from the branding settings, falling back to the snippet.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.branding_settings
            .as_ref()
            .and_then(|b| b.channel.as_ref())
            .and_then(|c| c.country.as_deref())
            .or(self.snippet.country.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelSnippet {
    pub title: String,
    pub description: String,
    pub thumbnails: Thumbnails,
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelStatistics {
    #[serde(deserialize_with = "de_count")]
    pub subscriber_count: u64,
    #[serde(deserialize_with = "de_count")]
    pub video_count: u64,
    #[serde(deserialize_with = "de_count")]
    pub view_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandingSettings {
    pub channel: Option<BrandingChannel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandingChannel {
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

impl Thumbnails {
    #[must_use]
    pub fn best_url(&self) -> Option<String> {
        self.high
            .as_ref()
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

// ---------------------------------------------------------------------------
// videos.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub snippet: Option<VideoSnippet>,
    #[serde(default)]
    pub statistics: VideoStatistics,
}

impl Video {
    #[must_use]
    pub fn stats(&self) -> VideoStats {
        VideoStats {
            views: self.statistics.view_count,
            likes: self.statistics.like_count,
            comments: self.statistics.comment_count,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoSnippet {
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
    pub tags: Vec<String>,
    pub category_id: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoStatistics {
    #[serde(deserialize_with = "de_count")]
    pub view_count: u64,
    #[serde(deserialize_with = "de_count")]
    pub like_count: u64,
    #[serde(deserialize_with = "de_count")]
    pub comment_count: u64,
}

// ---------------------------------------------------------------------------
// Error body
// ---------------------------------------------------------------------------

/// `{"error": {"code": 403, "message": "...", "errors": [{"reason": "quotaExceeded"}]}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorDetail {
    pub reason: String,
    pub message: String,
}

fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        serde_json::Value::Number(n) => n.as_u64().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_statistics_parse_string_counts() {
        let stats: ChannelStatistics = serde_json::from_value(serde_json::json!({
            "subscriberCount": "125000",
            "videoCount": 42,
            "viewCount": "not-a-number"
        }))
        .unwrap();
        assert_eq!(stats.subscriber_count, 125_000);
        assert_eq!(stats.video_count, 42);
        assert_eq!(stats.view_count, 0);
    }

    #[test]
    fn hidden_like_count_defaults_to_zero() {
        let video: Video = serde_json::from_value(serde_json::json!({
            "id": "v1",
            "statistics": { "viewCount": "10", "commentCount": "2" }
        }))
        .unwrap();
        assert_eq!(
            video.stats(),
            VideoStats {
                views: 10,
                likes: 0,
                comments: 2
            }
        );
    }

    #[test]
    fn thumbnail_falls_back_to_lower_resolutions() {
        let channel: Channel = serde_json::from_value(serde_json::json!({
            "id": "UC1",
            "snippet": {
                "title": "t",
                "thumbnails": { "default": { "url": "https://i.ytimg.com/d.jpg" } }
            }
        }))
        .unwrap();
        assert_eq!(channel.thumbnail_url(), "https://i.ytimg.com/d.jpg");
    }

    #[test]
    fn country_prefers_branding_settings() {
        let channel: Channel = serde_json::from_value(serde_json::json!({
            "id": "UC1",
            "snippet": { "title": "t", "country": "US" },
            "brandingSettings": { "channel": { "country": "IN" } }
        }))
        .unwrap();
        assert_eq!(channel.country(), Some("IN"));
    }

    #[test]
    fn missing_items_is_empty_list() {
        let resp: ListResponse<Channel> = serde_json::from_str("{\"kind\":\"x\"}").unwrap();
        assert!(resp.items.is_empty());
    }
}
