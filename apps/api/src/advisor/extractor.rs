//! Preference Extractor: turns free-text conversation into a `PreferenceRecord`.

use tracing::{debug, warn};

use crate::advisor::models::{validate_confidence, ParseError, PreferenceRecord};
use crate::advisor::prompts::PREFERENCE_EXTRACTION_PROMPT;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, Oracle};

/// Extracts preferences from `conversation`.
///
/// Oracle failures propagate. Output that does not parse into a valid record
/// is replaced by `PreferenceRecord::fallback()`; there is no retry.
pub async fn extract_preferences(
    oracle: &dyn Oracle,
    conversation: &str,
) -> Result<PreferenceRecord, AppError> {
    let prompt = PREFERENCE_EXTRACTION_PROMPT.replace("{conversation}", conversation);
    let raw = oracle.complete_prompt(JSON_ONLY_SYSTEM, &prompt).await?;

    match parse_preferences(&raw) {
        Ok(record) => {
            debug!(
                "Extracted {} interests, {} skills (confidence {:.2})",
                record.interests.len(),
                record.skills.len(),
                record.confidence_score
            );
            Ok(record)
        }
        Err(e) => {
            warn!("Preference extraction output rejected, using fallback record: {e}");
            Ok(PreferenceRecord::fallback())
        }
    }
}

/// Parses and validates a raw extraction response.
pub fn parse_preferences(raw: &str) -> Result<PreferenceRecord, ParseError> {
    let record: PreferenceRecord = serde_json::from_str(strip_json_fences(raw))?;
    validate_confidence(record.confidence_score)?;
    Ok(record)
}
