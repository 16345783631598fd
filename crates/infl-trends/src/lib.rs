//! Trend statistics from the `YouTube` most-popular chart: hashtag and
//! keyword counts plus timestamped JSON or CSV reports.

pub mod analyzer;
pub mod error;
pub mod extract;
pub mod report;

pub use analyzer::{analyze, TrendOptions, MUSIC_CATEGORY_ID};
pub use error::TrendError;
pub use extract::{extract_hashtags, extract_keywords, TermCount, TrendingVideo};
pub use report::{write_csv_report, write_json_report, write_report, ReportFormat, TrendReport};
