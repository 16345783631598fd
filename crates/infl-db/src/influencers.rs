//! Postgres-backed [`InfluencerRepository`] over the `influencers` table.

use chrono::{DateTime, Utc};
use infl_core::{InfluencerRecord, SocialLinks};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::repository::{
    ContactCoverage, InfluencerQuery, InfluencerRepository, SubscriberRange, UpsertOutcome,
};
use crate::DbError;

const SELECT_COLUMNS: &str = "channel_id, channel_title, description, thumbnail_url, \
     subscriber_count, video_count, view_count, categories, contact_email, business_email, \
     contact_phone, social_links, language, engagement_rate, avg_views_per_video, \
     created_at, last_updated";

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `influencers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct InfluencerRow {
    channel_id: String,
    channel_title: String,
    description: String,
    thumbnail_url: String,
    subscriber_count: i64,
    video_count: i64,
    view_count: i64,
    categories: Vec<String>,
    contact_email: Option<String>,
    business_email: Option<String>,
    contact_phone: Option<String>,
    social_links: Json<SocialLinks>,
    language: String,
    engagement_rate: f64,
    avg_views_per_video: i64,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl From<InfluencerRow> for InfluencerRecord {
    fn from(row: InfluencerRow) -> Self {
        Self {
            channel_id: row.channel_id,
            channel_title: row.channel_title,
            description: row.description,
            thumbnail_url: row.thumbnail_url,
            subscriber_count: to_u64(row.subscriber_count),
            video_count: to_u64(row.video_count),
            view_count: to_u64(row.view_count),
            categories: row.categories,
            contact_email: row.contact_email,
            business_email: row.business_email,
            contact_phone: row.contact_phone,
            social_links: row.social_links.0,
            language: row.language,
            engagement_rate: row.engagement_rate,
            avg_views_per_video: to_u64(row.avg_views_per_video),
            created_at: row.created_at,
            last_updated: row.last_updated,
        }
    }
}

// Columns carry CHECK (>= 0); counts above i64::MAX saturate.
fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn to_i64_usize(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PgInfluencerRepository {
    pool: PgPool,
}

impl PgInfluencerRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl InfluencerRepository for PgInfluencerRepository {
    async fn find_by_channel_id(
        &self,
        channel_id: &str,
    ) -> Result<Option<InfluencerRecord>, DbError> {
        let row = sqlx::query_as::<_, InfluencerRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM influencers WHERE channel_id = $1"
        ))
        .bind(channel_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InfluencerRecord::from))
    }

    async fn contains(&self, channel_id: &str) -> Result<bool, DbError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM influencers WHERE channel_id = $1)",
        )
        .bind(channel_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn upsert_by_category(
        &self,
        record: &InfluencerRecord,
        category: &str,
    ) -> Result<UpsertOutcome, DbError> {
        let mut categories = record.categories.clone();
        if !record.has_category(category) {
            categories.push(category.to_string());
        }

        // The conflict branch only fires when the category is new, so a row
        // that already carries it returns nothing.
        let inserted = sqlx::query_scalar::<_, bool>(
            "INSERT INTO influencers (channel_id, channel_title, description, thumbnail_url, \
                 subscriber_count, video_count, view_count, categories, contact_email, \
                 business_email, contact_phone, social_links, language, engagement_rate, \
                 avg_views_per_video, created_at, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             ON CONFLICT (channel_id) DO UPDATE \
                 SET categories = array_append(influencers.categories, $18::text), \
                     last_updated = NOW() \
                 WHERE NOT ($18::text = ANY(influencers.categories)) \
             RETURNING (xmax = 0) AS is_new",
        )
        .bind(&record.channel_id)
        .bind(&record.channel_title)
        .bind(&record.description)
        .bind(&record.thumbnail_url)
        .bind(to_i64(record.subscriber_count))
        .bind(to_i64(record.video_count))
        .bind(to_i64(record.view_count))
        .bind(&categories)
        .bind(record.contact_email.as_deref())
        .bind(record.business_email.as_deref())
        .bind(record.contact_phone.as_deref())
        .bind(Json(&record.social_links))
        .bind(&record.language)
        .bind(record.engagement_rate)
        .bind(to_i64(record.avg_views_per_video))
        .bind(record.created_at)
        .bind(record.last_updated)
        .bind(category)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match inserted {
            Some(true) => UpsertOutcome::Inserted,
            Some(false) => UpsertOutcome::CategoryAdded,
            None => UpsertOutcome::Unchanged,
        })
    }

    async fn add_category(
        &self,
        channel_id: &str,
        category: &str,
    ) -> Result<Option<UpsertOutcome>, DbError> {
        let updated = sqlx::query_scalar::<_, i64>(
            "UPDATE influencers \
             SET categories = array_append(categories, $2::text), last_updated = NOW() \
             WHERE channel_id = $1 AND NOT ($2::text = ANY(categories)) \
             RETURNING id",
        )
        .bind(channel_id)
        .bind(category)
        .fetch_optional(&self.pool)
        .await?;

        if updated.is_some() {
            return Ok(Some(UpsertOutcome::CategoryAdded));
        }

        if self.contains(channel_id).await? {
            Ok(Some(UpsertOutcome::Unchanged))
        } else {
            Ok(None)
        }
    }

    async fn query_by_categories_and_min_subscribers(
        &self,
        query: &InfluencerQuery,
    ) -> Result<Vec<InfluencerRecord>, DbError> {
        let rows = sqlx::query_as::<_, InfluencerRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM influencers \
             WHERE subscriber_count >= $1 \
               AND (cardinality($2::text[]) = 0 OR categories && $2::text[]) \
             ORDER BY subscriber_count DESC, id ASC \
             LIMIT $3"
        ))
        .bind(to_i64(query.min_subscribers))
        .bind(&query.categories)
        .bind(to_i64_usize(query.limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(InfluencerRecord::from).collect())
    }

    async fn count_all(&self) -> Result<u64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM influencers")
            .fetch_one(&self.pool)
            .await?;
        Ok(to_u64(count))
    }

    async fn count_by_category(
        &self,
        categories: &[String],
    ) -> Result<Vec<(String, u64)>, DbError> {
        let mut counts = Vec::with_capacity(categories.len());
        for category in categories {
            let count = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM influencers WHERE $1::text = ANY(categories)",
            )
            .bind(category)
            .fetch_one(&self.pool)
            .await?;
            counts.push((category.clone(), to_u64(count)));
        }
        Ok(counts)
    }

    async fn count_by_range(
        &self,
        ranges: &[SubscriberRange],
    ) -> Result<Vec<(SubscriberRange, u64)>, DbError> {
        let mut counts = Vec::with_capacity(ranges.len());
        for range in ranges {
            let count = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM influencers \
                 WHERE subscriber_count >= $1 \
                   AND ($2::bigint IS NULL OR subscriber_count < $2::bigint)",
            )
            .bind(to_i64(range.min))
            .bind(range.max.map(to_i64))
            .fetch_one(&self.pool)
            .await?;
            counts.push((*range, to_u64(count)));
        }
        Ok(counts)
    }

    async fn contact_coverage(&self) -> Result<ContactCoverage, DbError> {
        let (total, with_email, with_business_email, with_phone, with_instagram) =
            sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
                "SELECT COUNT(*), \
                        COUNT(*) FILTER (WHERE contact_email IS NOT NULL), \
                        COUNT(*) FILTER (WHERE business_email IS NOT NULL), \
                        COUNT(*) FILTER (WHERE contact_phone IS NOT NULL), \
                        COUNT(*) FILTER (WHERE social_links->>'instagram' IS NOT NULL) \
                 FROM influencers",
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(ContactCoverage {
            total: to_u64(total),
            with_email: to_u64(with_email),
            with_business_email: to_u64(with_business_email),
            with_phone: to_u64(with_phone),
            with_instagram: to_u64(with_instagram),
        })
    }
}
