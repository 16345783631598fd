//! The influencer record model shared by the collector, storage and exports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Social profile handles keyed by platform. Absent handles serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
}

/// A single discovered channel.
///
/// `channel_id` is the unique key. `categories` only ever grows; use
/// [`InfluencerRecord::add_category`] rather than pushing directly so the
/// set semantics hold. `engagement_rate` and `avg_views_per_video` are
/// snapshots taken when the record was first inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerRecord {
    pub channel_id: String,
    pub channel_title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub view_count: u64,
    pub categories: Vec<String>,
    pub contact_email: Option<String>,
    pub business_email: Option<String>,
    pub contact_phone: Option<String>,
    pub social_links: SocialLinks,
    pub language: String,
    pub engagement_rate: f64,
    pub avg_views_per_video: u64,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl InfluencerRecord {
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Adds `category` if it is not already present. Returns `true` when the
    /// set changed.
    pub fn add_category(&mut self, category: &str) -> bool {
        if self.has_category(category) {
            return false;
        }
        self.categories.push(category.to_string());
        true
    }

    #[must_use]
    pub fn has_any_category(&self, categories: &[String]) -> bool {
        categories.iter().any(|c| self.has_category(c))
    }
}

/// Per-video counters as reported by the statistics endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoStats {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record() -> InfluencerRecord {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        InfluencerRecord {
            channel_id: "UC123".to_string(),
            channel_title: "Chennai Comedy".to_string(),
            description: "தமிழ் comedy".to_string(),
            thumbnail_url: "https://i.ytimg.com/x.jpg".to_string(),
            subscriber_count: 120_000,
            video_count: 40,
            view_count: 9_000_000,
            categories: vec!["Tamil comedy".to_string()],
            contact_email: Some("hi@example.com".to_string()),
            business_email: None,
            contact_phone: None,
            social_links: SocialLinks {
                instagram: Some("chennaicomedy".to_string()),
                ..SocialLinks::default()
            },
            language: "Tamil".to_string(),
            engagement_rate: 4.25,
            avg_views_per_video: 22_000,
            created_at: ts,
            last_updated: ts,
        }
    }

    #[test]
    fn add_category_is_idempotent() {
        let mut r = record();
        assert!(r.add_category("Tamil tech"));
        assert!(!r.add_category("Tamil tech"));
        assert!(!r.add_category("Tamil comedy"));
        assert_eq!(r.categories, vec!["Tamil comedy", "Tamil tech"]);
    }

    #[test]
    fn has_any_category_matches_overlap() {
        let r = record();
        assert!(r.has_any_category(&["Tamil movies".to_string(), "Tamil comedy".to_string()]));
        assert!(!r.has_any_category(&["Tamil movies".to_string()]));
        assert!(!r.has_any_category(&[]));
    }

    #[test]
    fn serializes_camel_case_with_iso_timestamps() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["channelId"], "UC123");
        assert_eq!(json["subscriberCount"], 120_000);
        assert_eq!(json["socialLinks"]["instagram"], "chennaicomedy");
        assert!(json["socialLinks"]["twitter"].is_null());
        assert_eq!(json["createdAt"], "2025-03-01T12:00:00Z");
        assert_eq!(json["lastUpdated"], "2025-03-01T12:00:00Z");
    }
}
