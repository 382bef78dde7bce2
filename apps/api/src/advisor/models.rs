use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason substituted when the mapper returns fewer reasons than careers.
pub const DEFAULT_MATCH_REASON: &str = "Good general fit";

/// Structured career preferences extracted from free-text conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    pub dislikes: Vec<String>,
    pub work_style: String,
    pub confidence_score: f64,
}

impl PreferenceRecord {
    /// Low-confidence record used when extraction output cannot be parsed.
    pub fn fallback() -> Self {
        Self {
            interests: vec![],
            skills: vec![],
            dislikes: vec![],
            work_style: "unknown".to_string(),
            confidence_score: 0.3,
        }
    }
}

/// Careers chosen for a preference record. `match_reasons` is index-aligned
/// with `career_paths` and may be shorter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub career_paths: Vec<String>,
    pub match_reasons: Vec<String>,
    pub confidence_score: f64,
}

impl RecommendationSet {
    pub fn fallback() -> Self {
        Self {
            career_paths: vec!["General Business".to_string(), "Liberal Arts".to_string()],
            match_reasons: vec![
                "Broad applicability".to_string(),
                "Flexible options".to_string(),
            ],
            confidence_score: 0.4,
        }
    }

    /// Reason for the career at `index`, defaulting when the list is short.
    pub fn reason_for(&self, index: usize) -> &str {
        self.match_reasons
            .get(index)
            .map(String::as_str)
            .unwrap_or(DEFAULT_MATCH_REASON)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainedRecommendation {
    pub career_path: String,
    pub explanation: String,
    pub match_reason: String,
}

/// Caller-facing outcome of every pipeline entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineResult {
    ConversationStarted {
        response: String,
        session_id: String,
        initial_preferences: PreferenceRecord,
    },
    ContinueConversation {
        response: String,
        session_id: String,
    },
    ReadyForRecommendation {
        response: String,
        session_id: String,
    },
    Complete {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
        preferences: PreferenceRecord,
        recommendations: RecommendationSet,
        explanations: Vec<ExplainedRecommendation>,
    },
    NeedsClarification {
        questions: String,
        extracted_preferences: PreferenceRecord,
    },
}

impl PipelineResult {
    pub fn status(&self) -> &'static str {
        match self {
            PipelineResult::ConversationStarted { .. } => "conversation_started",
            PipelineResult::ContinueConversation { .. } => "continue_conversation",
            PipelineResult::ReadyForRecommendation { .. } => "ready_for_recommendation",
            PipelineResult::Complete { .. } => "complete",
            PipelineResult::NeedsClarification { .. } => "needs_clarification",
        }
    }
}

/// Why a model response could not be turned into a typed record.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("response is not valid JSON: {0}")]
    Syntax(serde_json::Error),

    #[error("JSON does not match the expected schema: {0}")]
    Schema(serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match e.classify() {
            Category::Data => ParseError::Schema(e),
            Category::Io | Category::Syntax | Category::Eof => ParseError::Syntax(e),
        }
    }
}

/// Confidence scores must be finite and lie in [0, 1].
pub fn validate_confidence(score: f64) -> Result<(), ParseError> {
    if score.is_finite() && (0.0..=1.0).contains(&score) {
        Ok(())
    } else {
        Err(ParseError::Invalid(format!(
            "confidence_score {score} is outside [0, 1]"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_for_defaults_past_the_end() {
        let set = RecommendationSet {
            career_paths: vec!["Data Science".into(), "Marketing".into()],
            match_reasons: vec!["Loves statistics".into()],
            confidence_score: 0.8,
        };
        assert_eq!(set.reason_for(0), "Loves statistics");
        assert_eq!(set.reason_for(1), DEFAULT_MATCH_REASON);
    }

    #[test]
    fn test_pipeline_result_is_tagged_by_status() {
        let result = PipelineResult::ContinueConversation {
            response: "What do you enjoy?".into(),
            session_id: "career_session_0011aabb".into(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "continue_conversation");
        assert_eq!(value["session_id"], "career_session_0011aabb");
        assert_eq!(result.status(), "continue_conversation");
    }

    #[test]
    fn test_complete_without_session_omits_the_field() {
        let result = PipelineResult::Complete {
            session_id: None,
            preferences: PreferenceRecord::fallback(),
            recommendations: RecommendationSet::fallback(),
            explanations: vec![],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "complete");
        assert!(value.get("session_id").is_none());
    }

    #[test]
    fn test_parse_error_classifies_syntax_and_schema() {
        let syntax = serde_json::from_str::<PreferenceRecord>("not json").unwrap_err();
        assert!(matches!(ParseError::from(syntax), ParseError::Syntax(_)));

        let schema = serde_json::from_str::<PreferenceRecord>(r#"{"hobbies": []}"#).unwrap_err();
        assert!(matches!(ParseError::from(schema), ParseError::Schema(_)));
    }

    #[test]
    fn test_validate_confidence_bounds() {
        assert!(validate_confidence(0.0).is_ok());
        assert!(validate_confidence(1.0).is_ok());
        assert!(validate_confidence(1.5).is_err());
        assert!(validate_confidence(f64::NAN).is_err());
    }
}
