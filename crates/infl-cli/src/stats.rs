//! `stats` command handler.

use std::fmt;

use infl_core::AppConfig;
use infl_db::{
    ContactCoverage, DbError, InfluencerRepository, PgInfluencerRepository, SubscriberRange,
    SUBSCRIBER_RANGES,
};

use crate::collect::load_categories_file;

/// `part / total` as a percentage rounded to one decimal; `0.0` when `total`
/// is zero.
pub(crate) fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = part as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatsSummary {
    pub(crate) total: u64,
    pub(crate) by_category: Vec<(String, u64)>,
    pub(crate) by_range: Vec<(SubscriberRange, u64)>,
    pub(crate) contacts: ContactCoverage,
}

impl StatsSummary {
    pub(crate) async fn collect<R: InfluencerRepository>(
        repo: &R,
        categories: &[String],
    ) -> Result<Self, DbError> {
        Ok(Self {
            total: repo.count_all().await?,
            by_category: repo.count_by_category(categories).await?,
            by_range: repo.count_by_range(&SUBSCRIBER_RANGES).await?,
            contacts: repo.contact_coverage().await?,
        })
    }
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return writeln!(
                f,
                "No influencers in the database yet. Run `infl-cli collect` first."
            );
        }

        writeln!(f, "Total influencers: {}", self.total)?;

        writeln!(f, "\nBy category:")?;
        for (category, count) in &self.by_category {
            writeln!(f, "  {category}: {count}")?;
        }

        writeln!(f, "\nBy subscribers:")?;
        for (range, count) in &self.by_range {
            writeln!(f, "  {}: {count}", range.label)?;
        }

        let c = &self.contacts;
        writeln!(f, "\nContact coverage:")?;
        for (label, n) in [
            ("Email", c.with_email),
            ("Business email", c.with_business_email),
            ("Phone", c.with_phone),
            ("Instagram", c.with_instagram),
        ] {
            writeln!(f, "  {label}: {n} ({:.1}%)", percentage(n, c.total))?;
        }
        Ok(())
    }
}

pub(crate) async fn run_stats(config: &AppConfig) -> anyhow::Result<()> {
    let categories = load_categories_file(config)?.categories;
    let pool = infl_db::connect_pool_from_config(config).await?;
    let repo = PgInfluencerRepository::new(pool.clone());

    let summary = StatsSummary::collect(&repo, &categories).await?;
    pool.close().await;

    print!("{summary}");
    Ok(())
}
