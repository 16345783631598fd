//! Offline tests for infl-db pool configuration and the repository contract.
//! These tests do not require a live database connection.

use std::path::PathBuf;

use infl_core::{AppConfig, Environment};
use infl_db::{InfluencerQuery, PoolConfig, SubscriberRange, SUBSCRIBER_RANGES};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: Some("postgres://example".to_string()),
        env: Environment::Test,
        log_level: "info".to_string(),
        categories_path: PathBuf::from("./config/categories.yaml"),
        youtube_api_key: None,
        youtube_base_url: None,
        youtube_request_timeout_secs: 30,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        search_max_results: 10,
        recent_video_sample: 10,
        inter_request_delay_ms: 1000,
        quota_cooldown_secs: 3600,
        quota_max_retries: 1,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn subscriber_ranges_are_ordered_largest_first() {
    let labels: Vec<&str> = SUBSCRIBER_RANGES.iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        vec!["1M+", "500K-1M", "100K-500K", "50K-100K", "10K-50K", "<10K"]
    );
    assert!(SUBSCRIBER_RANGES
        .windows(2)
        .all(|w| w[0].min > w[1].min));
}

#[test]
fn custom_range_is_half_open() {
    let range = SubscriberRange::new("tiny", 0, Some(10));
    assert!(range.contains(9));
    assert!(!range.contains(10));
}

#[test]
fn empty_category_filter_matches_everything() {
    let query = InfluencerQuery {
        min_subscribers: 0,
        ..InfluencerQuery::default()
    };
    assert!(query.categories.is_empty());
    assert_eq!(query.limit, 100);
}
