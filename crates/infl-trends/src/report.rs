use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::TrendError;
use crate::extract::{TermCount, TrendingVideo};

/// One trend analysis snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub trending_videos: Vec<TrendingVideo>,
    pub trending_music: Vec<TrendingVideo>,
    pub trending_hashtags: Vec<TermCount>,
    pub trending_keywords: Vec<TermCount>,
    #[serde(rename = "timestamp")]
    pub generated_at: DateTime<Utc>,
}

impl TrendReport {
    fn stamp(&self) -> String {
        self.generated_at.format("%Y%m%d_%H%M%S").to_string()
    }

    /// `youtube_trends_<YYYYmmdd_HHMMSS>.json`, stamped with `generated_at`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("youtube_trends_{}.json", self.stamp())
    }

    /// `youtube_trending_<kind>_<YYYYmmdd_HHMMSS>.csv`.
    #[must_use]
    pub fn csv_file_name(&self, kind: &str) -> String {
        format!("youtube_trending_{kind}_{}.csv", self.stamp())
    }
}

/// On-disk layout of a trend report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// A single pretty-printed JSON document.
    #[default]
    Json,
    /// One CSV file each for videos, music, hashtags and keywords.
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(format!("unknown report format '{other}' (expected json or csv)")),
        }
    }
}

fn create_dir(dir: &Path) -> Result<(), TrendError> {
    fs::create_dir_all(dir).map_err(|source| TrendError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes `report` as pretty-printed UTF-8 JSON into `dir`, creating the
/// directory if needed. Returns the written path.
///
/// # Errors
///
/// Returns [`TrendError::Io`] if the directory or file cannot be written.
pub fn write_json_report(report: &TrendReport, dir: &Path) -> Result<PathBuf, TrendError> {
    create_dir(dir)?;

    let path = dir.join(report.file_name());
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json).map_err(|source| TrendError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

const VIDEO_HEADER: [&str; 11] = [
    "id",
    "title",
    "channelTitle",
    "publishedAt",
    "viewCount",
    "likeCount",
    "commentCount",
    "tags",
    "categoryId",
    "thumbnailUrl",
    "url",
];

fn write_csv<T: Serialize>(
    path: &Path,
    header: &[&str],
    rows: impl IntoIterator<Item = T>,
) -> Result<(), TrendError> {
    let csv_err = |source: csv::Error| TrendError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(header).map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| TrendError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_video_csv(path: &Path, videos: &[TrendingVideo]) -> Result<(), TrendError> {
    let rows = videos.iter().map(|v| {
        (
            &v.id,
            &v.title,
            &v.channel_title,
            &v.published_at,
            v.view_count,
            v.like_count,
            v.comment_count,
            v.tags.join(", "),
            &v.category_id,
            &v.thumbnail_url,
            &v.url,
        )
    });
    write_csv(path, &VIDEO_HEADER, rows)
}

fn write_term_csv(path: &Path, label: &str, terms: &[TermCount]) -> Result<(), TrendError> {
    write_csv(path, &[label, "count"], terms.iter().map(|t| (&t.term, t.count)))
}

/// Writes `report` as four CSV files into `dir`: videos, music, hashtags and
/// keywords, in that order. Empty lists still get a header row. Tags are
/// joined with `", "`.
///
/// # Errors
///
/// Returns [`TrendError::Io`] if the directory cannot be created, or
/// [`TrendError::Csv`] if a file cannot be written.
pub fn write_csv_report(report: &TrendReport, dir: &Path) -> Result<Vec<PathBuf>, TrendError> {
    create_dir(dir)?;

    let videos = dir.join(report.csv_file_name("videos"));
    write_video_csv(&videos, &report.trending_videos)?;
    let music = dir.join(report.csv_file_name("music"));
    write_video_csv(&music, &report.trending_music)?;
    let hashtags = dir.join(report.csv_file_name("hashtags"));
    write_term_csv(&hashtags, "hashtag", &report.trending_hashtags)?;
    let keywords = dir.join(report.csv_file_name("keywords"));
    write_term_csv(&keywords, "keyword", &report.trending_keywords)?;

    Ok(vec![videos, music, hashtags, keywords])
}

/// Writes `report` into `dir` in the requested format and returns every
/// file written.
///
/// # Errors
///
/// Propagates the errors of [`write_json_report`] and [`write_csv_report`].
pub fn write_report(
    report: &TrendReport,
    dir: &Path,
    format: ReportFormat,
) -> Result<Vec<PathBuf>, TrendError> {
    match format {
        ReportFormat::Json => Ok(vec![write_json_report(report, dir)?]),
        ReportFormat::Csv => write_csv_report(report, dir),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn video(id: &str, title: &str, tags: &[&str]) -> TrendingVideo {
        TrendingVideo {
            id: id.to_string(),
            title: title.to_string(),
            channel_title: "Studio".to_string(),
            published_at: "2025-03-01T10:00:00Z".to_string(),
            view_count: 1_000,
            like_count: 10,
            comment_count: 1,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            category_id: "24".to_string(),
            thumbnail_url: String::new(),
            url: format!("https://www.youtube.com/watch?v={id}"),
        }
    }

    fn report() -> TrendReport {
        TrendReport {
            trending_videos: Vec::new(),
            trending_music: Vec::new(),
            trending_hashtags: vec![TermCount {
                term: "#தமிழ்".to_string(),
                count: 3,
            }],
            trending_keywords: Vec::new(),
            generated_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 7).unwrap(),
        }
    }

    #[test]
    fn file_name_uses_compact_timestamp() {
        assert_eq!(report().file_name(), "youtube_trends_20250301_090507.json");
    }

    #[test]
    fn writes_pretty_json_with_native_script() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("trend_reports");

        let path = write_json_report(&report(), &nested).unwrap();

        assert_eq!(path, nested.join("youtube_trends_20250301_090507.json"));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"#தமிழ்\""), "non-ASCII should not be escaped");
        assert!(text.contains("\"timestamp\": \"2025-03-01T09:05:07Z\""));
        assert!(text.contains("\n  \"trending_videos\""));
    }

    #[test]
    fn parses_report_formats() {
        assert_eq!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert_eq!("CSV".parse::<ReportFormat>(), Ok(ReportFormat::Csv));
        assert!("html".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::default(), ReportFormat::Json);
    }

    #[test]
    fn writes_four_csv_files_with_native_script() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = report();
        report.trending_videos = vec![video("v1", "விஜய், \"Leo\" trailer", &["#leo", "tamil"])];
        report.trending_keywords = vec![TermCount {
            term: "leo".to_string(),
            count: 4,
        }];

        let paths = write_csv_report(&report, dir.path()).unwrap();

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "youtube_trending_videos_20250301_090507.csv",
                "youtube_trending_music_20250301_090507.csv",
                "youtube_trending_hashtags_20250301_090507.csv",
                "youtube_trending_keywords_20250301_090507.csv",
            ]
        );

        let videos = fs::read_to_string(&paths[0]).unwrap();
        let mut lines = videos.lines();
        assert_eq!(
            lines.next(),
            Some("id,title,channelTitle,publishedAt,viewCount,likeCount,commentCount,tags,categoryId,thumbnailUrl,url")
        );
        assert_eq!(
            lines.next(),
            Some("v1,\"விஜய், \"\"Leo\"\" trailer\",Studio,2025-03-01T10:00:00Z,1000,10,1,\"#leo, tamil\",24,,https://www.youtube.com/watch?v=v1")
        );

        let music = fs::read_to_string(&paths[1]).unwrap();
        assert_eq!(music.lines().count(), 1, "empty list keeps its header");

        let hashtags = fs::read_to_string(&paths[2]).unwrap();
        assert_eq!(hashtags, "hashtag,count\n#தமிழ்,3\n");
        let keywords = fs::read_to_string(&paths[3]).unwrap();
        assert_eq!(keywords, "keyword,count\nleo,4\n");
    }

    #[test]
    fn write_report_dispatches_on_format() {
        let dir = tempfile::tempdir().unwrap();

        let json = write_report(&report(), dir.path(), ReportFormat::Json).unwrap();
        assert_eq!(json, vec![dir.path().join("youtube_trends_20250301_090507.json")]);

        let csv = write_report(&report(), dir.path(), ReportFormat::Csv).unwrap();
        assert_eq!(csv.len(), 4);
        assert!(csv.iter().all(|p| p.exists()));
    }
}
