//! Clarifying questions for the single-shot pipeline.

use crate::advisor::prompts::{CLARIFY_GENERAL_PROMPT, CLARIFY_INSUFFICIENT_INFO_PROMPT};
use crate::errors::AppError;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::Oracle;

/// Characters of conversation passed as context to the general question.
const CONTEXT_CHARS: usize = 200;

/// Which clarification template to send. The single-shot pipeline always
/// asks `InsufficientInfo`; `General` must be requested explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClarificationKind {
    /// Open question asking for more about interests and skills.
    #[default]
    InsufficientInfo,
    /// Follow-up grounded in the start of the conversation.
    General,
}

pub async fn ask_clarifying_question(
    oracle: &dyn Oracle,
    kind: ClarificationKind,
    conversation: &str,
) -> Result<String, AppError> {
    let prompt = match kind {
        ClarificationKind::InsufficientInfo => CLARIFY_INSUFFICIENT_INFO_PROMPT.to_string(),
        ClarificationKind::General => {
            CLARIFY_GENERAL_PROMPT.replace("{context}", &context_prefix(conversation))
        }
    };
    let question = oracle.complete_prompt(PLAIN_TEXT_SYSTEM, &prompt).await?;
    Ok(question.trim().to_string())
}

fn context_prefix(conversation: &str) -> String {
    conversation.chars().take(CONTEXT_CHARS).collect()
}
