//! Counselor reply review and conversation summaries.

use crate::advisor::prompts::{CONVERSATION_SUMMARY_PROMPT, RESPONSE_VALIDATION_PROMPT};
use crate::errors::AppError;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::Oracle;

const REVISION_PREFIX: &str = "NEEDS_REVISION";

/// Verdict on whether a counselor reply follows the conversation guidelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyReview {
    Valid,
    NeedsRevision(String),
    /// The reviewer answered outside the `VALID` / `NEEDS_REVISION` contract.
    Unrecognized(String),
}

impl ReplyReview {
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim().trim_matches('"').trim();
        if let Some(rest) = text.strip_prefix(REVISION_PREFIX) {
            let reason = rest.trim_start_matches(':').trim();
            ReplyReview::NeedsRevision(reason.to_string())
        } else if text.starts_with("VALID") {
            ReplyReview::Valid
        } else {
            ReplyReview::Unrecognized(text.to_string())
        }
    }
}

pub async fn review_reply(oracle: &dyn Oracle, reply: &str) -> Result<ReplyReview, AppError> {
    let prompt = RESPONSE_VALIDATION_PROMPT.replace("{response}", reply);
    let raw = oracle.complete_prompt(PLAIN_TEXT_SYSTEM, &prompt).await?;
    Ok(ReplyReview::parse(&raw))
}

pub async fn summarize_transcript(oracle: &dyn Oracle, transcript: &str) -> Result<String, AppError> {
    let prompt = CONVERSATION_SUMMARY_PROMPT.replace("{conversation}", transcript);
    let summary = oracle.complete_prompt(PLAIN_TEXT_SYSTEM, &prompt).await?;
    Ok(summary.trim().to_string())
}
