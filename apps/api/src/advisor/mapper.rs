//! Career Mapper: maps a `PreferenceRecord` onto the career catalog.

use tracing::{debug, warn};

use crate::advisor::models::{
    validate_confidence, ParseError, PreferenceRecord, RecommendationSet,
};
use crate::advisor::prompts::{career_catalog_list, CAREER_CATALOG, CAREER_MAPPING_PROMPT};
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, Oracle};

/// Asks the oracle for careers matching `preferences`.
/// Unparseable output is replaced by `RecommendationSet::fallback()`.
pub async fn map_careers(
    oracle: &dyn Oracle,
    preferences: &PreferenceRecord,
) -> Result<RecommendationSet, AppError> {
    let preferences_json = serde_json::to_string(preferences)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize preferences: {e}")))?;

    let prompt = CAREER_MAPPING_PROMPT
        .replace("{career_catalog}", &career_catalog_list())
        .replace("{preferences}", &preferences_json);
    let raw = oracle.complete_prompt(JSON_ONLY_SYSTEM, &prompt).await?;

    match parse_recommendations(&raw) {
        Ok(set) => {
            for career in set
                .career_paths
                .iter()
                .filter(|c| !CAREER_CATALOG.contains(&c.as_str()))
            {
                debug!("Mapper proposed a career outside the catalog: {career}");
            }
            Ok(set)
        }
        Err(e) => {
            warn!("Career mapping output rejected, using fallback careers: {e}");
            Ok(RecommendationSet::fallback())
        }
    }
}

/// Parses and validates a raw mapping response.
pub fn parse_recommendations(raw: &str) -> Result<RecommendationSet, ParseError> {
    let set: RecommendationSet = serde_json::from_str(strip_json_fences(raw))?;
    validate_confidence(set.confidence_score)?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedOracle;

    fn coder() -> PreferenceRecord {
        PreferenceRecord {
            interests: vec!["coding".into()],
            skills: vec!["rust".into()],
            dislikes: vec![],
            work_style: "independent".into(),
            confidence_score: 0.9,
        }
    }

    #[tokio::test]
    async fn test_invalid_json_yields_exact_fallback() {
        let oracle = ScriptedOracle::new(["I'd suggest Software Engineering!"]);
        let set = map_careers(&oracle, &coder()).await.unwrap();
        assert_eq!(
            set,
            RecommendationSet {
                career_paths: vec!["General Business".into(), "Liberal Arts".into()],
                match_reasons: vec!["Broad applicability".into(), "Flexible options".into()],
                confidence_score: 0.4,
            }
        );
    }

    #[tokio::test]
    async fn test_prompt_carries_serialized_preferences_and_catalog() {
        let oracle = ScriptedOracle::new([r#"{
            "career_paths": ["Software Engineering"],
            "match_reasons": ["Enjoys building software"],
            "confidence_score": 0.85
        }"#]);
        let set = map_careers(&oracle, &coder()).await.unwrap();
        assert_eq!(set.career_paths, vec!["Software Engineering"]);

        let prompt = oracle.calls()[0].last_content().to_string();
        assert!(prompt.contains(r#""interests":["coding"]"#));
        assert!(prompt.contains("- Music Production"));
    }

    #[test]
    fn test_parse_recommendations_keeps_short_reason_lists() {
        let set = parse_recommendations(
            r#"```json
            {"career_paths": ["Nursing", "Marketing"], "match_reasons": ["Caring"], "confidence_score": 0.7}
            ```"#,
        )
        .unwrap();
        assert_eq!(set.career_paths.len(), 2);
        assert_eq!(set.match_reasons.len(), 1);
    }

    #[test]
    fn test_parse_recommendations_rejects_missing_career_paths() {
        let err = parse_recommendations(r#"{"careers": [], "confidence_score": 0.5}"#).unwrap_err();
        assert!(matches!(err, ParseError::Schema(_)));
    }
}
