mod collect;
mod export;
mod stats;
mod trends;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use infl_trends::ReportFormat;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "infl-cli")]
#[command(about = "YouTube influencer discovery and trend statistics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover channels for the configured categories and store them
    Collect {
        /// Restrict the run to these categories (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Keep results in memory instead of writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Export stored influencers to a JSON file
    Export {
        /// Only influencers tagged with this category
        #[arg(long)]
        category: Option<String>,
        /// Minimum subscriber count
        #[arg(long, default_value = "0")]
        min_subscribers: u64,
        /// Output path (defaults to a name derived from the filters)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Export the top influencers of every configured category
    ExportTop {
        /// Influencers per category
        #[arg(long, default_value = "10")]
        limit: usize,
        #[arg(long, default_value = "top_influencers.json")]
        output: PathBuf,
    },
    /// Print database statistics
    Stats,
    /// Analyze the most-popular chart and write a trend report
    Trends {
        #[arg(long, default_value = "trend_reports")]
        output_dir: PathBuf,
        /// Region for the most-popular chart
        #[arg(long, default_value = "IN")]
        region: String,
        /// Language code sent with chart requests (defaults to the profile's code)
        #[arg(long)]
        language: Option<String>,
        /// Report format: json or csv
        #[arg(long, default_value = "json")]
        format: ReportFormat,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check database connectivity
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = infl_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(config.ansi_logs())
        .init();

    match cli.command {
        Some(Commands::Collect {
            categories,
            dry_run,
        }) => collect::run_collect(&config, &categories, dry_run).await?,
        Some(Commands::Export {
            category,
            min_subscribers,
            output,
        }) => {
            export::run_export(&config, category.as_deref(), min_subscribers, output).await?;
        }
        Some(Commands::ExportTop { limit, output }) => {
            export::run_export_top(&config, limit, &output).await?;
        }
        Some(Commands::Stats) => stats::run_stats(&config).await?,
        Some(Commands::Trends {
            output_dir,
            region,
            language,
            format,
        }) => {
            trends::run_trends(&config, &output_dir, &region, language, format).await?;
        }
        Some(Commands::Db { command }) => run_db(&config, command).await?,
        None => println!("infl-cli: no command given; run with --help for usage"),
    }

    Ok(())
}

async fn run_db(config: &infl_core::AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let pool = infl_db::connect_pool_from_config(config).await?;
    match command {
        DbCommands::Migrate => {
            let applied = infl_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Ping => {
            infl_db::health_check(&pool).await?;
            println!("database reachable");
        }
    }
    pool.close().await;
    Ok(())
}
