//! `collect` command handler.
//!
//! Credentials are checked before any request is made. The run is raced
//! against Ctrl-C; interrupting drops the pipeline between calls and keeps
//! whatever was already stored.

use std::time::Duration;

use anyhow::Context;
use infl_collector::{CollectionPipeline, CollectionSummary, ContentClassifier, PipelineConfig};
use infl_core::{load_categories, AppConfig, CategoriesFile};
use infl_db::{InfluencerRepository, MemoryInfluencerRepository, PgInfluencerRepository};
use infl_youtube::{RetryPolicy, YouTubeClient};

/// Builds the API client from config, failing fast when no key is set.
pub(crate) fn build_youtube_client(config: &AppConfig) -> anyhow::Result<YouTubeClient> {
    let api_key = config.require_youtube_api_key()?;
    let timeout = config.youtube_request_timeout_secs;
    let client = match config.youtube_base_url.as_deref() {
        Some(base_url) => YouTubeClient::with_base_url(api_key, timeout, base_url)?,
        None => YouTubeClient::new(api_key, timeout)?,
    };
    Ok(client.with_retry_policy(RetryPolicy::new(
        Duration::from_secs(config.quota_cooldown_secs),
        config.quota_max_retries,
    )))
}

pub(crate) fn load_categories_file(config: &AppConfig) -> anyhow::Result<CategoriesFile> {
    load_categories(&config.categories_path).with_context(|| {
        format!(
            "loading categories from {}",
            config.categories_path.display()
        )
    })
}

pub(crate) async fn run_collect(
    config: &AppConfig,
    only: &[String],
    dry_run: bool,
) -> anyhow::Result<()> {
    let file = load_categories_file(config)?;
    let categories = if only.is_empty() {
        file.categories.clone()
    } else {
        file.select(only)?
    };

    let client = build_youtube_client(config)?;
    let classifier = ContentClassifier::new(file.language.clone());
    let pipeline_config = PipelineConfig::from_app_config(config);

    if dry_run {
        let repo = MemoryInfluencerRepository::new();
        let pipeline = CollectionPipeline::new(&client, &repo, pipeline_config, classifier);
        if let Some(summary) = run_until_interrupted(&pipeline, &categories).await {
            print_summary(&summary);
        }
        let records = repo.records();
        println!("dry-run: {} influencer(s) found, nothing written", records.len());
        for record in &records {
            println!(
                "  {} ({}) subscribers={} categories=[{}]",
                record.channel_title,
                record.channel_id,
                record.subscriber_count,
                record.categories.join(", ")
            );
        }
        return Ok(());
    }

    let pool = infl_db::connect_pool_from_config(config).await?;
    let repo = PgInfluencerRepository::new(pool.clone());
    let pipeline = CollectionPipeline::new(&client, &repo, pipeline_config, classifier);

    if let Some(summary) = run_until_interrupted(&pipeline, &categories).await {
        print_summary(&summary);
    }
    pool.close().await;
    Ok(())
}

async fn run_until_interrupted<R: InfluencerRepository>(
    pipeline: &CollectionPipeline<'_, R>,
    categories: &[String],
) -> Option<CollectionSummary> {
    tokio::select! {
        summary = pipeline.run(categories) => Some(summary),
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted; stopping collection");
            None
        }
    }
}

fn print_summary(summary: &CollectionSummary) {
    for report in &summary.categories {
        if report.search_failed {
            println!("{}: search failed", report.category);
            continue;
        }
        println!(
            "{}: candidates={} inserted={} category_added={} unchanged={} skipped={} failed={}",
            report.category,
            report.candidates,
            report.inserted,
            report.category_added,
            report.unchanged,
            report.skipped(),
            report.failed
        );
    }
    println!(
        "collection complete: inserted={} category_added={} skipped={} failed={} failed_searches={}",
        summary.inserted(),
        summary.category_added(),
        summary.skipped(),
        summary.failed(),
        summary.failed_searches()
    );
}
