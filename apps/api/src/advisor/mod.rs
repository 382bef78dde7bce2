// Career advisor: preference extraction, counselor conversation, career mapping
// and explanation, composed by the orchestrator in pipeline.rs.
// All oracle calls go through the `Oracle` trait; no direct HTTP calls here.

pub mod clarifier;
pub mod conversation;
pub mod explainer;
pub mod extractor;
pub mod handlers;
pub mod history;
pub mod mapper;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod review;
pub mod seed;

pub use models::{ExplainedRecommendation, PipelineResult, PreferenceRecord, RecommendationSet};
pub use pipeline::CareerAdvisor;
