//! In-process [`InfluencerRepository`] used by tests and `collect --dry-run`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use infl_core::InfluencerRecord;

use crate::repository::{
    ContactCoverage, InfluencerQuery, InfluencerRepository, SubscriberRange, UpsertOutcome,
};
use crate::DbError;

/// Records kept in insertion order behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryInfluencerRepository {
    records: Mutex<Vec<InfluencerRecord>>,
}

impl MemoryInfluencerRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. Later duplicates of a `channel_id` are dropped.
    #[must_use]
    pub fn with_records(records: Vec<InfluencerRecord>) -> Self {
        let mut unique: Vec<InfluencerRecord> = Vec::with_capacity(records.len());
        for record in records {
            if !unique.iter().any(|r| r.channel_id == record.channel_id) {
                unique.push(record);
            }
        }
        Self {
            records: Mutex::new(unique),
        }
    }

    /// A snapshot of every record in insertion order.
    #[must_use]
    pub fn records(&self) -> Vec<InfluencerRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<InfluencerRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn to_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

impl InfluencerRepository for MemoryInfluencerRepository {
    async fn find_by_channel_id(
        &self,
        channel_id: &str,
    ) -> Result<Option<InfluencerRecord>, DbError> {
        Ok(self
            .lock()
            .iter()
            .find(|r| r.channel_id == channel_id)
            .cloned())
    }

    async fn upsert_by_category(
        &self,
        record: &InfluencerRecord,
        category: &str,
    ) -> Result<UpsertOutcome, DbError> {
        let mut records = self.lock();

        if let Some(existing) = records
            .iter_mut()
            .find(|r| r.channel_id == record.channel_id)
        {
            if existing.add_category(category) {
                existing.last_updated = Utc::now();
                return Ok(UpsertOutcome::CategoryAdded);
            }
            return Ok(UpsertOutcome::Unchanged);
        }

        let mut fresh = record.clone();
        fresh.add_category(category);
        records.push(fresh);
        Ok(UpsertOutcome::Inserted)
    }

    async fn add_category(
        &self,
        channel_id: &str,
        category: &str,
    ) -> Result<Option<UpsertOutcome>, DbError> {
        let mut records = self.lock();
        let Some(existing) = records.iter_mut().find(|r| r.channel_id == channel_id) else {
            return Ok(None);
        };

        if existing.add_category(category) {
            existing.last_updated = Utc::now();
            Ok(Some(UpsertOutcome::CategoryAdded))
        } else {
            Ok(Some(UpsertOutcome::Unchanged))
        }
    }

    async fn query_by_categories_and_min_subscribers(
        &self,
        query: &InfluencerQuery,
    ) -> Result<Vec<InfluencerRecord>, DbError> {
        let mut matched: Vec<InfluencerRecord> = self
            .lock()
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();

        // Stable sort keeps insertion order among equal counts.
        matched.sort_by(|a, b| b.subscriber_count.cmp(&a.subscriber_count));
        matched.truncate(query.limit);
        Ok(matched)
    }

    async fn count_all(&self) -> Result<u64, DbError> {
        Ok(to_u64(self.lock().len()))
    }

    async fn count_by_category(
        &self,
        categories: &[String],
    ) -> Result<Vec<(String, u64)>, DbError> {
        let records = self.lock();
        Ok(categories
            .iter()
            .map(|c| {
                let n = records.iter().filter(|r| r.has_category(c)).count();
                (c.clone(), to_u64(n))
            })
            .collect())
    }

    async fn count_by_range(
        &self,
        ranges: &[SubscriberRange],
    ) -> Result<Vec<(SubscriberRange, u64)>, DbError> {
        let records = self.lock();
        Ok(ranges
            .iter()
            .map(|range| {
                let n = records
                    .iter()
                    .filter(|r| range.contains(r.subscriber_count))
                    .count();
                (*range, to_u64(n))
            })
            .collect())
    }

    async fn contact_coverage(&self) -> Result<ContactCoverage, DbError> {
        let records = self.lock();
        let count = |f: fn(&InfluencerRecord) -> bool| to_u64(records.iter().filter(|r| f(r)).count());

        Ok(ContactCoverage {
            total: to_u64(records.len()),
            with_email: count(|r| r.contact_email.is_some()),
            with_business_email: count(|r| r.business_email.is_some()),
            with_phone: count(|r| r.contact_phone.is_some()),
            with_instagram: count(|r| r.social_links.instagram.is_some()),
        })
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
