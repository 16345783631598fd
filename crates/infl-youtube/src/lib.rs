//! `YouTube` Data API v3 client.
//!
//! Exposes the handful of read-only calls the collector and trend analysis
//! need: channel search, channel details, recent uploads, video statistics and
//! the most-popular chart. Quota exhaustion is retried inside the client after
//! a fixed cooldown; see [`RetryPolicy`].

pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::{TrendingQuery, YouTubeClient};
pub use error::YouTubeError;
pub use retry::RetryPolicy;
pub use types::{Channel, ChannelCandidate, Video};
