//! Influencer discovery: contact extraction, language classification,
//! engagement scoring and the per-category collection pipeline.

pub mod classifier;
pub mod contact;
pub mod engagement;
pub mod pipeline;
pub mod types;

pub use classifier::ContentClassifier;
pub use contact::{extract_contact_info, ContactInfo};
pub use engagement::{fetch_engagement, score_engagement, Engagement};
pub use pipeline::{build_record, CollectionPipeline};
pub use types::{CandidateOutcome, CategoryReport, CollectionSummary, PipelineConfig};
