use std::time::Duration;

use infl_core::AppConfig;
use infl_db::UpsertOutcome;

const DEFAULT_SEARCH_MAX_RESULTS: u32 = 10;
const DEFAULT_RECENT_VIDEO_SAMPLE: u32 = 10;
const DEFAULT_CANDIDATE_DELAY_MS: u64 = 1000;

/// Tuning for a collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Channels requested per category search.
    pub search_max_results: u32,
    /// Recent uploads sampled for the engagement score.
    pub recent_video_sample: u32,
    /// Pause before each candidate after the first.
    pub candidate_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_max_results: DEFAULT_SEARCH_MAX_RESULTS,
            recent_video_sample: DEFAULT_RECENT_VIDEO_SAMPLE,
            candidate_delay: Duration::from_millis(DEFAULT_CANDIDATE_DELAY_MS),
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            search_max_results: config.search_max_results,
            recent_video_sample: config.recent_video_sample,
            candidate_delay: Duration::from_millis(config.inter_request_delay_ms),
        }
    }
}

/// What happened to one search candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// Written (or left as-is) in the repository.
    Stored(UpsertOutcome),
    /// The channel id returned no details.
    NotFound,
    /// The detail request failed after retries.
    DetailFailed,
    /// Rejected by the language classifier.
    NotMatching,
}

/// Per-category tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: String,
    pub candidates: usize,
    pub inserted: usize,
    pub category_added: usize,
    pub unchanged: usize,
    pub not_found: usize,
    pub detail_failed: usize,
    pub not_matching: usize,
    /// Repository errors; the candidate was dropped.
    pub failed: usize,
    /// The category search itself failed, so no candidates were seen.
    pub search_failed: bool,
}

impl CategoryReport {
    #[must_use]
    pub fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: CandidateOutcome) {
        match outcome {
            CandidateOutcome::Stored(UpsertOutcome::Inserted) => self.inserted += 1,
            CandidateOutcome::Stored(UpsertOutcome::CategoryAdded) => self.category_added += 1,
            CandidateOutcome::Stored(UpsertOutcome::Unchanged) => self.unchanged += 1,
            CandidateOutcome::NotFound => self.not_found += 1,
            CandidateOutcome::DetailFailed => self.detail_failed += 1,
            CandidateOutcome::NotMatching => self.not_matching += 1,
        }
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.not_found + self.detail_failed + self.not_matching
    }
}

/// Result of [`crate::CollectionPipeline::run`], one report per category in
/// the order processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    pub categories: Vec<CategoryReport>,
}

impl CollectionSummary {
    #[must_use]
    pub fn inserted(&self) -> usize {
        self.categories.iter().map(|c| c.inserted).sum()
    }

    #[must_use]
    pub fn category_added(&self) -> usize {
        self.categories.iter().map(|c| c.category_added).sum()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.categories.iter().map(CategoryReport::skipped).sum()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.categories.iter().map(|c| c.failed).sum()
    }

    #[must_use]
    pub fn failed_searches(&self) -> usize {
        self.categories.iter().filter(|c| c.search_failed).count()
    }
}
