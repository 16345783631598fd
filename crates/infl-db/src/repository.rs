//! Storage abstraction for influencer records.
//!
//! [`InfluencerRepository`] is implemented by [`crate::PgInfluencerRepository`]
//! for real runs and [`crate::MemoryInfluencerRepository`] for tests and
//! `--dry-run`. Both guarantee exactly one record per `channel_id` and an
//! append-only category set.

use infl_core::InfluencerRecord;

use crate::DbError;

/// What a write did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new record was stored.
    Inserted,
    /// An existing record gained the category and had `last_updated` refreshed.
    CategoryAdded,
    /// The record already carried the category; nothing was written.
    Unchanged,
}

const DEFAULT_QUERY_LIMIT: usize = 100;

/// Filter for [`InfluencerRepository::query_by_categories_and_min_subscribers`].
///
/// An empty `categories` list matches every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluencerQuery {
    pub categories: Vec<String>,
    pub min_subscribers: u64,
    pub limit: usize,
}

impl Default for InfluencerQuery {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            min_subscribers: 0,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl InfluencerQuery {
    #[must_use]
    pub fn matches(&self, record: &InfluencerRecord) -> bool {
        record.subscriber_count >= self.min_subscribers
            && (self.categories.is_empty() || record.has_any_category(&self.categories))
    }
}

/// The highest-subscribed records for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTop {
    pub category: String,
    pub influencers: Vec<InfluencerRecord>,
}

/// A half-open subscriber bucket `[min, max)`; `max = None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberRange {
    pub label: &'static str,
    pub min: u64,
    pub max: Option<u64>,
}

impl SubscriberRange {
    #[must_use]
    pub const fn new(label: &'static str, min: u64, max: Option<u64>) -> Self {
        Self { label, min, max }
    }

    #[must_use]
    pub fn contains(&self, subscribers: u64) -> bool {
        subscribers >= self.min && self.max.is_none_or(|max| subscribers < max)
    }
}

/// Buckets used by the `stats` summary, largest first.
pub const SUBSCRIBER_RANGES: [SubscriberRange; 6] = [
    SubscriberRange::new("1M+", 1_000_000, None),
    SubscriberRange::new("500K-1M", 500_000, Some(1_000_000)),
    SubscriberRange::new("100K-500K", 100_000, Some(500_000)),
    SubscriberRange::new("50K-100K", 50_000, Some(100_000)),
    SubscriberRange::new("10K-50K", 10_000, Some(50_000)),
    SubscriberRange::new("<10K", 0, Some(10_000)),
];

/// How many stored records carry each kind of contact detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactCoverage {
    pub total: u64,
    pub with_email: u64,
    pub with_business_email: u64,
    pub with_phone: u64,
    pub with_instagram: u64,
}

/// Deduplicated influencer store.
///
/// Futures are not required to be `Send`: the pipeline drives one call at a
/// time on the caller's task.
#[allow(async_fn_in_trait)]
pub trait InfluencerRepository {
    /// # Errors
    ///
    /// Returns [`DbError`] if the backing store fails.
    async fn find_by_channel_id(
        &self,
        channel_id: &str,
    ) -> Result<Option<InfluencerRecord>, DbError>;

    /// # Errors
    ///
    /// Returns [`DbError`] if the backing store fails.
    async fn contains(&self, channel_id: &str) -> Result<bool, DbError> {
        Ok(self.find_by_channel_id(channel_id).await?.is_some())
    }

    /// Inserts `record` tagged with `category`, or appends `category` to the
    /// stored record with the same `channel_id`.
    ///
    /// A concurrent insert of the same channel resolves to
    /// [`UpsertOutcome::CategoryAdded`] or [`UpsertOutcome::Unchanged`], never
    /// to an error.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backing store fails.
    async fn upsert_by_category(
        &self,
        record: &InfluencerRecord,
        category: &str,
    ) -> Result<UpsertOutcome, DbError>;

    /// Appends `category` to an already-stored channel. Returns `None` when the
    /// channel is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backing store fails.
    async fn add_category(
        &self,
        channel_id: &str,
        category: &str,
    ) -> Result<Option<UpsertOutcome>, DbError>;

    /// Records matching `query`, highest subscriber count first. Equal counts
    /// keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backing store fails.
    async fn query_by_categories_and_min_subscribers(
        &self,
        query: &InfluencerQuery,
    ) -> Result<Vec<InfluencerRecord>, DbError>;

    /// Top `limit` records for each category, in the order given. A record
    /// tagged with several categories appears in each list.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backing store fails.
    async fn top_per_category(
        &self,
        categories: &[String],
        limit: usize,
    ) -> Result<Vec<CategoryTop>, DbError> {
        let mut tops = Vec::with_capacity(categories.len());
        for category in categories {
            let query = InfluencerQuery {
                categories: vec![category.clone()],
                min_subscribers: 0,
                limit,
            };
            let influencers = self
                .query_by_categories_and_min_subscribers(&query)
                .await?;
            tops.push(CategoryTop {
                category: category.clone(),
                influencers,
            });
        }
        Ok(tops)
    }

    /// # Errors
    ///
    /// Returns [`DbError`] if the backing store fails.
    async fn count_all(&self) -> Result<u64, DbError>;

    /// Record count per category, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backing store fails.
    async fn count_by_category(&self, categories: &[String])
        -> Result<Vec<(String, u64)>, DbError>;

    /// Record count per subscriber bucket, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backing store fails.
    async fn count_by_range(
        &self,
        ranges: &[SubscriberRange],
    ) -> Result<Vec<(SubscriberRange, u64)>, DbError>;

    /// # Errors
    ///
    /// Returns [`DbError`] if the backing store fails.
    async fn contact_coverage(&self) -> Result<ContactCoverage, DbError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_partition_the_subscriber_axis() {
        let samples = [
            0,
            9_999,
            10_000,
            49_999,
            50_000,
            99_999,
            100_000,
            500_000,
            999_999,
            1_000_000,
            u64::MAX,
        ];
        for n in samples {
            let hits = SUBSCRIBER_RANGES.iter().filter(|r| r.contains(n)).count();
            assert_eq!(hits, 1, "{n} should fall in exactly one range");
        }
    }

    #[test]
    fn range_bounds_are_half_open() {
        let r = SUBSCRIBER_RANGES[1];
        assert_eq!(r.label, "500K-1M");
        assert!(r.contains(500_000));
        assert!(!r.contains(1_000_000));
    }

    #[test]
    fn default_query_limit_is_one_hundred() {
        assert_eq!(InfluencerQuery::default().limit, 100);
    }
}
