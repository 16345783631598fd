use chrono::{TimeZone, Utc};
use infl_core::SocialLinks;

use super::*;
use crate::SUBSCRIBER_RANGES;

fn record(channel_id: &str, subscribers: u64, categories: &[&str]) -> InfluencerRecord {
    let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    InfluencerRecord {
        channel_id: channel_id.to_string(),
        channel_title: format!("Channel {channel_id}"),
        description: String::new(),
        thumbnail_url: String::new(),
        subscriber_count: subscribers,
        video_count: 10,
        view_count: subscribers * 10,
        categories: categories.iter().map(ToString::to_string).collect(),
        contact_email: None,
        business_email: None,
        contact_phone: None,
        social_links: SocialLinks::default(),
        language: "Tamil".to_string(),
        engagement_rate: 0.0,
        avg_views_per_video: 0,
        created_at: ts,
        last_updated: ts,
    }
}

fn cats(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn upsert_inserts_then_appends_category() {
    let repo = MemoryInfluencerRepository::new();
    let r = record("UC1", 1_000, &[]);

    let first = repo.upsert_by_category(&r, "Tamil comedy").await.unwrap();
    assert_eq!(first, UpsertOutcome::Inserted);

    let second = repo.upsert_by_category(&r, "Tamil tech").await.unwrap();
    assert_eq!(second, UpsertOutcome::CategoryAdded);

    let stored = repo.find_by_channel_id("UC1").await.unwrap().unwrap();
    assert_eq!(stored.categories, vec!["Tamil comedy", "Tamil tech"]);
    assert!(stored.last_updated > r.last_updated);
    assert_eq!(stored.created_at, r.created_at);
    assert_eq!(repo.count_all().await.unwrap(), 1);
}

#[tokio::test]
async fn upsert_existing_category_is_noop() {
    let repo = MemoryInfluencerRepository::new();
    let r = record("UC1", 1_000, &[]);
    repo.upsert_by_category(&r, "Tamil comedy").await.unwrap();
    let before = repo.find_by_channel_id("UC1").await.unwrap().unwrap();

    let outcome = repo.upsert_by_category(&r, "Tamil comedy").await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Unchanged);

    let after = repo.find_by_channel_id("UC1").await.unwrap().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn upsert_never_overwrites_stored_fields() {
    let repo = MemoryInfluencerRepository::new();
    repo.upsert_by_category(&record("UC1", 1_000, &[]), "Tamil comedy")
        .await
        .unwrap();

    let mut changed = record("UC1", 999_999, &[]);
    changed.channel_title = "Renamed".to_string();
    repo.upsert_by_category(&changed, "Tamil tech").await.unwrap();

    let stored = repo.find_by_channel_id("UC1").await.unwrap().unwrap();
    assert_eq!(stored.subscriber_count, 1_000);
    assert_eq!(stored.channel_title, "Channel UC1");
}

#[tokio::test]
async fn add_category_reports_unknown_channel() {
    let repo = MemoryInfluencerRepository::with_records(vec![record("UC1", 10, &["Tamil comedy"])]);

    assert_eq!(repo.add_category("UC404", "Tamil tech").await.unwrap(), None);
    assert_eq!(
        repo.add_category("UC1", "Tamil tech").await.unwrap(),
        Some(UpsertOutcome::CategoryAdded)
    );
    assert_eq!(
        repo.add_category("UC1", "Tamil tech").await.unwrap(),
        Some(UpsertOutcome::Unchanged)
    );
    assert!(repo.contains("UC1").await.unwrap());
    assert!(!repo.contains("UC404").await.unwrap());
}

#[tokio::test]
async fn query_orders_by_subscribers_with_stable_ties() {
    let repo = MemoryInfluencerRepository::with_records(vec![
        record("A", 500, &["Tamil comedy"]),
        record("B", 900, &["Tamil tech"]),
        record("C", 500, &["Tamil comedy", "Tamil tech"]),
        record("D", 50, &["Tamil fashion"]),
    ]);

    let all = repo
        .query_by_categories_and_min_subscribers(&InfluencerQuery::default())
        .await
        .unwrap();
    let ids: Vec<_> = all.iter().map(|r| r.channel_id.as_str()).collect();
    assert_eq!(ids, vec!["B", "A", "C", "D"]);

    let filtered = repo
        .query_by_categories_and_min_subscribers(&InfluencerQuery {
            categories: cats(&["Tamil comedy"]),
            min_subscribers: 100,
            limit: 1,
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].channel_id, "A");
}

#[tokio::test]
async fn top_per_category_lists_multi_category_records_everywhere() {
    let repo = MemoryInfluencerRepository::with_records(vec![
        record("A", 500, &["Tamil comedy"]),
        record("B", 900, &["Tamil comedy", "Tamil tech"]),
        record("C", 100, &["Tamil tech"]),
    ]);

    let tops = repo
        .top_per_category(&cats(&["Tamil comedy", "Tamil tech", "Tamil movies"]), 10)
        .await
        .unwrap();

    assert_eq!(tops.len(), 3);
    assert_eq!(tops[0].category, "Tamil comedy");
    let comedy: Vec<_> = tops[0].influencers.iter().map(|r| r.channel_id.as_str()).collect();
    assert_eq!(comedy, vec!["B", "A"]);
    let tech: Vec<_> = tops[1].influencers.iter().map(|r| r.channel_id.as_str()).collect();
    assert_eq!(tech, vec!["B", "C"]);
    assert!(tops[2].influencers.is_empty());
}

#[tokio::test]
async fn aggregate_counts() {
    let mut with_contacts = record("A", 2_000_000, &["Tamil comedy"]);
    with_contacts.contact_email = Some("a@example.com".to_string());
    with_contacts.social_links.instagram = Some("a_insta".to_string());
    let mut with_phone = record("B", 75_000, &["Tamil tech"]);
    with_phone.contact_phone = Some("555-123-4567".to_string());
    with_phone.business_email = Some("biz@example.com".to_string());

    let repo = MemoryInfluencerRepository::with_records(vec![
        with_contacts,
        with_phone,
        record("C", 5_000, &["Tamil comedy", "Tamil tech"]),
    ]);

    let by_category = repo
        .count_by_category(&cats(&["Tamil comedy", "Tamil tech", "Tamil movies"]))
        .await
        .unwrap();
    assert_eq!(
        by_category,
        vec![
            ("Tamil comedy".to_string(), 2),
            ("Tamil tech".to_string(), 2),
            ("Tamil movies".to_string(), 0)
        ]
    );

    let by_range = repo.count_by_range(&SUBSCRIBER_RANGES).await.unwrap();
    let counts: Vec<_> = by_range.iter().map(|(r, n)| (r.label, *n)).collect();
    assert_eq!(
        counts,
        vec![
            ("1M+", 1),
            ("500K-1M", 0),
            ("100K-500K", 0),
            ("50K-100K", 1),
            ("10K-50K", 0),
            ("<10K", 1)
        ]
    );

    let coverage = repo.contact_coverage().await.unwrap();
    assert_eq!(
        coverage,
        ContactCoverage {
            total: 3,
            with_email: 1,
            with_business_email: 1,
            with_phone: 1,
            with_instagram: 1,
        }
    );
}

#[test]
fn with_records_drops_duplicate_channel_ids() {
    let repo = MemoryInfluencerRepository::with_records(vec![
        record("A", 1, &["x"]),
        record("A", 2, &["y"]),
    ]);
    let records = repo.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].subscriber_count, 1);
}
