//! `export` and `export-top` command handlers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use infl_core::{AppConfig, InfluencerRecord};
use infl_db::{CategoryTop, InfluencerQuery, InfluencerRepository, PgInfluencerRepository};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::collect::load_categories_file;

/// Upper bound on records written by a single `export`.
pub(crate) const EXPORT_LIMIT: usize = 10_000;

/// `influencers[_<category>][_min<n>].json`, with the category lowercased and
/// spaces replaced by underscores.
pub(crate) fn default_export_path(category: Option<&str>, min_subscribers: u64) -> PathBuf {
    let mut name = String::from("influencers");
    if let Some(category) = category {
        name = format!("{name}_{}", category.to_lowercase().replace(' ', "_"));
    }
    if min_subscribers > 0 {
        name = format!("{name}_min{min_subscribers}");
    }
    PathBuf::from(format!("{name}.json"))
}

/// Category-keyed view of top lists. Keys are written in list order.
struct TopByCategory<'a>(&'a [CategoryTop]);

impl Serialize for TopByCategory<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for top in self.0 {
            map.serialize_entry(&top.category, &top.influencers)?;
        }
        map.end()
    }
}

fn write_pretty<T: Serialize + ?Sized>(value: &T, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Writes `records` as a pretty-printed JSON array.
pub(crate) fn export_records_json(records: &[InfluencerRecord], path: &Path) -> anyhow::Result<()> {
    write_pretty(records, path)
}

/// Writes `{ "<category>": [records...], ... }` in the order of `tops`.
pub(crate) fn export_top_json(tops: &[CategoryTop], path: &Path) -> anyhow::Result<()> {
    write_pretty(&TopByCategory(tops), path)
}

pub(crate) async fn run_export(
    config: &AppConfig,
    category: Option<&str>,
    min_subscribers: u64,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let pool = infl_db::connect_pool_from_config(config).await?;
    let repo = PgInfluencerRepository::new(pool.clone());

    let query = InfluencerQuery {
        categories: category.map(str::to_string).into_iter().collect(),
        min_subscribers,
        limit: EXPORT_LIMIT,
    };
    let records = repo.query_by_categories_and_min_subscribers(&query).await?;
    pool.close().await;

    let path = output.unwrap_or_else(|| default_export_path(category, min_subscribers));
    export_records_json(&records, &path)?;
    tracing::info!(count = records.len(), path = %path.display(), "export written");
    println!("Exported {} influencers to {}", records.len(), path.display());
    Ok(())
}

pub(crate) async fn run_export_top(
    config: &AppConfig,
    limit: usize,
    output: &Path,
) -> anyhow::Result<()> {
    let categories = load_categories_file(config)?.categories;
    let pool = infl_db::connect_pool_from_config(config).await?;
    let repo = PgInfluencerRepository::new(pool.clone());

    let tops = repo.top_per_category(&categories, limit).await?;
    pool.close().await;

    export_top_json(&tops, output)?;
    let total: usize = tops.iter().map(|t| t.influencers.len()).sum();
    println!(
        "Exported top {limit} influencers for {} categories ({total} entries) to {}",
        tops.len(),
        output.display()
    );
    Ok(())
}
