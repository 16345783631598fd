//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API key management, typed response deserialization,
//! and quota-error detection. Every public call goes through
//! [`retry_on_quota`], so a quota error blocks for the configured cooldown and
//! retries that same call rather than failing the caller's stage.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::YouTubeError;
use crate::retry::{retry_on_quota, RetryPolicy};
use crate::types::{
    Channel, ChannelCandidate, ErrorEnvelope, ListResponse, SearchResult, Video,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Error reasons that mean "come back later" rather than "this request is wrong".
const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "dailyLimitExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
];

/// Parameters for a `chart=mostPopular` listing.
#[derive(Debug, Clone)]
pub struct TrendingQuery {
    pub region_code: String,
    /// Interface language hint (`hl`), e.g. `"ta"`.
    pub language: String,
    /// Restrict to one video category (`"10"` is Music).
    pub category_id: Option<String>,
    pub max_results: u32,
}

/// Client for the `YouTube` Data API.
///
/// Use [`YouTubeClient::new`] for production or [`YouTubeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    retry: RetryPolicy,
}

impl YouTubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YouTubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YouTubeError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YouTubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("infl/0.1 (influencer-discovery)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YouTubeError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the quota retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Searches for channels matching `query`, most-viewed first.
    ///
    /// Results without a channel id (the API occasionally mixes in other
    /// resource kinds) are dropped.
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::QuotaExceeded`] once quota retries are exhausted.
    /// - [`YouTubeError::Api`] / [`YouTubeError::Http`] on other failures.
    /// - [`YouTubeError::Deserialize`] if the response has an unexpected shape.
    pub async fn search_channels(
        &self,
        query: &str,
        relevance_language: &str,
        max_results: u32,
    ) -> Result<Vec<ChannelCandidate>, YouTubeError> {
        let max = max_results.to_string();
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "channel"),
                ("relevanceLanguage", relevance_language),
                ("maxResults", &max),
                ("order", "viewCount"),
            ],
        )?;

        let response: ListResponse<SearchResult> = retry_on_quota(self.retry, "search", || {
            self.get_json("search(type=channel)", &url)
        })
        .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                let channel_id = item.id.channel_id?;
                let title = item.snippet.map(|s| s.title).unwrap_or_default();
                Some(ChannelCandidate { channel_id, title })
            })
            .collect())
    }

    /// Fetches full channel metadata. Returns `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// See [`YouTubeClient::search_channels`].
    pub async fn get_channel(&self, channel_id: &str) -> Result<Option<Channel>, YouTubeError> {
        let url = self.build_url(
            "channels",
            &[
                ("part", "snippet,statistics,contentDetails,brandingSettings"),
                ("id", channel_id),
            ],
        )?;

        let response: ListResponse<Channel> = retry_on_quota(self.retry, "channels", || {
            self.get_json("channels", &url)
        })
        .await?;

        Ok(response.items.into_iter().next())
    }

    /// Ids of a channel's most recent uploads, newest first.
    ///
    /// # Errors
    ///
    /// See [`YouTubeClient::search_channels`].
    pub async fn recent_video_ids(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YouTubeError> {
        let max = max_results.to_string();
        let url = self.build_url(
            "search",
            &[
                ("part", "id"),
                ("channelId", channel_id),
                ("order", "date"),
                ("type", "video"),
                ("maxResults", &max),
            ],
        )?;

        let response: ListResponse<SearchResult> = retry_on_quota(self.retry, "search", || {
            self.get_json("search(type=video)", &url)
        })
        .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    /// Statistics for the given video ids. An empty slice makes no request.
    ///
    /// # Errors
    ///
    /// See [`YouTubeClient::search_channels`].
    pub async fn video_statistics(&self, video_ids: &[String]) -> Result<Vec<Video>, YouTubeError> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = video_ids.join(",");
        let url = self.build_url("videos", &[("part", "statistics"), ("id", &ids)])?;

        let response: ListResponse<Video> = retry_on_quota(self.retry, "videos", || {
            self.get_json("videos(statistics)", &url)
        })
        .await?;

        Ok(response.items)
    }

    /// Most popular videos for a region, optionally within one category.
    ///
    /// # Errors
    ///
    /// See [`YouTubeClient::search_channels`].
    pub async fn trending_videos(&self, query: &TrendingQuery) -> Result<Vec<Video>, YouTubeError> {
        let max = query.max_results.to_string();
        let mut params = vec![
            ("part", "snippet,contentDetails,statistics"),
            ("chart", "mostPopular"),
            ("regionCode", query.region_code.as_str()),
            ("hl", query.language.as_str()),
            ("maxResults", max.as_str()),
        ];
        if let Some(category_id) = query.category_id.as_deref() {
            params.push(("videoCategoryId", category_id));
        }

        let url = self.build_url("videos", &params)?;
        let response: ListResponse<Video> = retry_on_quota(self.retry, "videos", || {
            self.get_json("videos(mostPopular)", &url)
        })
        .await?;

        Ok(response.items)
    }

    /// Builds the full request URL with percent-encoded query parameters and
    /// the API key.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, YouTubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YouTubeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request and parses a 2xx body as `T`. Non-2xx bodies are
    /// classified by [`classify_error`].
    ///
    /// `context` names the call in errors; the URL is deliberately not used
    /// because it carries the API key.
    async fn get_json<T: DeserializeOwned>(
        &self,
        context: &str,
        url: &Url,
    ) -> Result<T, YouTubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| YouTubeError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

/// Maps a non-2xx response to a typed error, recognising quota exhaustion
/// from HTTP 429, a known quota reason, or a message mentioning quota.
pub(crate) fn classify_error(status: StatusCode, body: &str) -> YouTubeError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();

    let message = parsed
        .as_ref()
        .map(|e| e.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    let quota_reason = parsed.as_ref().and_then(|e| {
        e.error
            .errors
            .iter()
            .find(|d| QUOTA_REASONS.contains(&d.reason.as_str()))
            .map(|d| d.reason.clone())
    });

    if status == StatusCode::TOO_MANY_REQUESTS
        || quota_reason.is_some()
        || message.to_lowercase().contains("quota")
    {
        let detail = match quota_reason {
            Some(reason) => format!("{reason}: {message}"),
            None => message,
        };
        return YouTubeError::QuotaExceeded(detail);
    }

    YouTubeError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
