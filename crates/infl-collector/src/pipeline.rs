//! Collection pipeline orchestration.

use chrono::{DateTime, Utc};
use infl_core::InfluencerRecord;
use infl_db::{DbError, InfluencerRepository};
use infl_youtube::{Channel, ChannelCandidate, YouTubeClient};

use crate::classifier::ContentClassifier;
use crate::contact::extract_contact_info;
use crate::engagement::{fetch_engagement, Engagement};
use crate::types::{CandidateOutcome, CategoryReport, CollectionSummary, PipelineConfig};

/// Discovers channels per category and stores the ones that pass the
/// language filter.
///
/// The client and repository are owned by the caller. Everything runs
/// sequentially; dropping the future returned by [`CollectionPipeline::run`]
/// cancels the run between calls.
pub struct CollectionPipeline<'a, R> {
    client: &'a YouTubeClient,
    repo: &'a R,
    config: PipelineConfig,
    classifier: ContentClassifier,
}

impl<'a, R: InfluencerRepository> CollectionPipeline<'a, R> {
    #[must_use]
    pub fn new(
        client: &'a YouTubeClient,
        repo: &'a R,
        config: PipelineConfig,
        classifier: ContentClassifier,
    ) -> Self {
        Self {
            client,
            repo,
            config,
            classifier,
        }
    }

    /// Collect every category in order.
    pub async fn run(&self, categories: &[String]) -> CollectionSummary {
        let mut summary = CollectionSummary::default();
        for category in categories {
            summary.categories.push(self.collect_category(category).await);
        }
        tracing::info!(
            categories = summary.categories.len(),
            inserted = summary.inserted(),
            category_added = summary.category_added(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "collection run complete"
        );
        summary
    }

    /// Search one category and process each candidate.
    ///
    /// 1. Search channels for the category.
    /// 2. Already-stored channels only gain the category.
    /// 3. Fetch details; unknown or failed channels are skipped.
    /// 4. Drop channels the classifier rejects.
    /// 5. Score engagement from recent uploads (zero on failure).
    /// 6. Build the record and upsert it.
    ///
    /// A failed search yields a report with `search_failed` set. Repository
    /// errors are counted in `failed` and do not stop the category.
    pub async fn collect_category(&self, category: &str) -> CategoryReport {
        let mut report = CategoryReport::new(category);

        let candidates = match self
            .client
            .search_channels(
                category,
                &self.classifier.profile().code,
                self.config.search_max_results,
            )
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::error!(category, error = %e, "category search failed");
                report.search_failed = true;
                return report;
            }
        };

        report.candidates = candidates.len();
        tracing::info!(category, candidates = candidates.len(), "processing category");

        for (i, candidate) in candidates.iter().enumerate() {
            if i > 0 && !self.config.candidate_delay.is_zero() {
                tokio::time::sleep(self.config.candidate_delay).await;
            }

            match self.process_candidate(category, candidate).await {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    tracing::error!(
                        category,
                        channel_id = %candidate.channel_id,
                        error = %e,
                        "failed to store candidate"
                    );
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            category,
            inserted = report.inserted,
            category_added = report.category_added,
            skipped = report.skipped(),
            failed = report.failed,
            "category complete"
        );
        report
    }

    async fn process_candidate(
        &self,
        category: &str,
        candidate: &ChannelCandidate,
    ) -> Result<CandidateOutcome, DbError> {
        let channel_id = candidate.channel_id.as_str();

        if let Some(outcome) = self.repo.add_category(channel_id, category).await? {
            tracing::debug!(channel_id, category, ?outcome, "channel already stored");
            return Ok(CandidateOutcome::Stored(outcome));
        }

        let channel = match self.client.get_channel(channel_id).await {
            Ok(Some(channel)) => channel,
            Ok(None) => {
                tracing::warn!(channel_id, title = %candidate.title, "no details for channel");
                return Ok(CandidateOutcome::NotFound);
            }
            Err(e) => {
                tracing::warn!(channel_id, error = %e, "channel detail fetch failed");
                return Ok(CandidateOutcome::DetailFailed);
            }
        };

        if !self.classifier.matches(
            &channel.snippet.title,
            &channel.snippet.description,
            channel.country(),
        ) {
            tracing::debug!(
                channel_id,
                title = %channel.snippet.title,
                language = %self.classifier.profile().name,
                "skipping channel outside target language"
            );
            return Ok(CandidateOutcome::NotMatching);
        }

        let engagement =
            fetch_engagement(self.client, channel_id, self.config.recent_video_sample).await;
        let record = build_record(
            &channel,
            category,
            engagement,
            &self.classifier.profile().name,
            Utc::now(),
        );

        let outcome = self.repo.upsert_by_category(&record, category).await?;
        tracing::info!(
            channel_id,
            title = %record.channel_title,
            subscribers = record.subscriber_count,
            ?outcome,
            "stored influencer"
        );
        Ok(CandidateOutcome::Stored(outcome))
    }
}

/// Builds a fresh record for `channel` tagged with `category`.
#[must_use]
pub fn build_record(
    channel: &Channel,
    category: &str,
    engagement: Engagement,
    language: &str,
    now: DateTime<Utc>,
) -> InfluencerRecord {
    let contact = extract_contact_info(&channel.snippet.description);

    InfluencerRecord {
        channel_id: channel.id.clone(),
        channel_title: channel.snippet.title.clone(),
        description: channel.snippet.description.clone(),
        thumbnail_url: channel.thumbnail_url(),
        subscriber_count: channel.statistics.subscriber_count,
        video_count: channel.statistics.video_count,
        view_count: channel.statistics.view_count,
        categories: vec![category.to_string()],
        contact_email: contact.email.clone(),
        business_email: contact.business_email.clone(),
        contact_phone: contact.phone.clone(),
        social_links: contact.social_links(),
        language: language.to_string(),
        engagement_rate: engagement.engagement_rate,
        avg_views_per_video: engagement.avg_views_per_video,
        created_at: now,
        last_updated: now,
    }
}
