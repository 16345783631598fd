use std::path::Path;

use infl_core::AppConfig;
use infl_trends::{analyze, write_report, ReportFormat, TrendOptions};

use crate::collect::{build_youtube_client, load_categories_file};

pub(crate) async fn run_trends(
    config: &AppConfig,
    output_dir: &Path,
    region: &str,
    language: Option<String>,
    format: ReportFormat,
) -> anyhow::Result<()> {
    let client = build_youtube_client(config)?;
    let language = match language {
        Some(code) => code,
        None => load_categories_file(config)?.language.code,
    };
    let opts = TrendOptions {
        region_code: region.to_string(),
        language,
        ..TrendOptions::default()
    };

    let report = analyze(&client, &opts).await?;
    let paths = write_report(&report, output_dir, format)?;

    println!(
        "Trend report ({format}): {} videos, {} music videos",
        report.trending_videos.len(),
        report.trending_music.len(),
    );
    for path in &paths {
        println!("  {}", path.display());
    }
    if !report.trending_hashtags.is_empty() {
        println!("Top hashtags:");
        for tag in report.trending_hashtags.iter().take(5) {
            println!("  {} ({})", tag.term, tag.count);
        }
    }
    Ok(())
}
