//! Recommendation Orchestrator: composes extraction, conversation, mapping
//! and explanation into the caller-facing pipelines.
//!
//! Interactive flow: begin → (continue_conversation)* → finalize.
//! Single-shot flow: recommend_once, which asks one clarifying question
//! instead of recommending when confidence is too low.
//!
//! Every oracle call is awaited before the next one starts.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::advisor::clarifier::{ask_clarifying_question, ClarificationKind};
use crate::advisor::conversation::{ConversationDriver, ConversationPolicy, TurnOutcome};
use crate::advisor::explainer::explain_career;
use crate::advisor::extractor::extract_preferences;
use crate::advisor::history::{render_transcript, HistoryStore};
use crate::advisor::mapper::map_careers;
use crate::advisor::models::{
    ExplainedRecommendation, PipelineResult, PreferenceRecord, RecommendationSet,
};
use crate::advisor::prompts::CONVERSATION_OPENER;
use crate::advisor::review::summarize_transcript;
use crate::errors::AppError;
use crate::llm_client::Oracle;
use crate::models::conversation::ChatTurn;

/// Initial extractions at or above this confidence skip the conversation.
pub const DIRECT_RECOMMENDATION_THRESHOLD: f64 = 0.7;
/// Single-shot extractions below this confidence get a clarifying question.
pub const CLARIFICATION_THRESHOLD: f64 = 0.6;

const SESSION_PREFIX: &str = "career_session_";

/// Generates a short random session id such as `career_session_1f3a9c0e`.
pub fn new_session_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{SESSION_PREFIX}{}", &hex[..8])
}

pub struct CareerAdvisor {
    oracle: Arc<dyn Oracle>,
    history: Arc<dyn HistoryStore>,
    driver: ConversationDriver,
}

impl CareerAdvisor {
    pub fn new(
        oracle: Arc<dyn Oracle>,
        history: Arc<dyn HistoryStore>,
        policy: ConversationPolicy,
    ) -> Self {
        let driver = ConversationDriver::new(oracle.clone(), history.clone(), policy);
        Self {
            oracle,
            history,
            driver,
        }
    }

    /// Starts the interactive pipeline from `initial_text`.
    ///
    /// Confident extractions are recommended on immediately; otherwise a
    /// counselor conversation is opened under `session_id` (generated when absent).
    /// A supplied id that already has history is rejected; restarting a chat
    /// means starting a new session.
    pub async fn begin(
        &self,
        initial_text: &str,
        session_id: Option<String>,
    ) -> Result<PipelineResult, AppError> {
        let session_id = match session_id {
            Some(id) => {
                if !self.history.read_all(&id).await?.is_empty() {
                    return Err(AppError::Validation(format!(
                        "Session {id} already exists; start a new session to restart"
                    )));
                }
                id
            }
            None => new_session_id(),
        };
        let initial_preferences = extract_preferences(self.oracle.as_ref(), initial_text).await?;
        info!(
            "Session {session_id}: initial extraction confidence {:.2}",
            initial_preferences.confidence_score
        );

        if initial_preferences.confidence_score >= DIRECT_RECOMMENDATION_THRESHOLD {
            info!("Session {session_id}: confidence high enough, recommending directly");
            return self
                .complete_recommendation(initial_preferences, Some(session_id))
                .await;
        }

        let opener = CONVERSATION_OPENER.replace("{initial_text}", initial_text);
        let reply = self.driver.take_turn(&session_id, &opener).await?;
        info!("Session {session_id}: conversation started");

        Ok(PipelineResult::ConversationStarted {
            response: reply.text,
            session_id,
            initial_preferences,
        })
    }

    /// Drives one more counselor turn for an existing session.
    pub async fn continue_conversation(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<PipelineResult, AppError> {
        self.history(session_id).await?;

        let reply = self.driver.take_turn(session_id, message).await?;
        let session_id = session_id.to_string();

        Ok(match self.driver.classify(&session_id, &reply) {
            TurnOutcome::Ready(_) => PipelineResult::ReadyForRecommendation {
                response: reply.text,
                session_id,
            },
            TurnOutcome::Continue => PipelineResult::ContinueConversation {
                response: reply.text,
                session_id,
            },
        })
    }

    /// Re-extracts preferences from the full transcript and recommends.
    pub async fn finalize(&self, session_id: &str) -> Result<PipelineResult, AppError> {
        let transcript = self.transcript(session_id).await?;
        let preferences = extract_preferences(self.oracle.as_ref(), &transcript).await?;
        info!(
            "Session {session_id}: final extraction confidence {:.2}",
            preferences.confidence_score
        );
        self.complete_recommendation(preferences, Some(session_id.to_string()))
            .await
    }

    /// Single-shot pipeline for callers that already hold a complete conversation.
    pub async fn recommend_once(&self, conversation: &str) -> Result<PipelineResult, AppError> {
        let preferences = extract_preferences(self.oracle.as_ref(), conversation).await?;

        if preferences.confidence_score < CLARIFICATION_THRESHOLD {
            info!(
                "Confidence {:.2} too low for a recommendation; asking for more information",
                preferences.confidence_score
            );
            let questions = ask_clarifying_question(
                self.oracle.as_ref(),
                ClarificationKind::InsufficientInfo,
                conversation,
            )
            .await?;
            return Ok(PipelineResult::NeedsClarification {
                questions,
                extracted_preferences: preferences,
            });
        }

        self.complete_recommendation(preferences, None).await
    }

    /// Ordered turns for a session; unknown sessions are `NotFound`.
    pub async fn history(&self, session_id: &str) -> Result<Vec<ChatTurn>, AppError> {
        let turns = self.history.read_all(session_id).await?;
        if turns.is_empty() {
            return Err(AppError::NotFound(format!("Session {session_id} not found")));
        }
        Ok(turns)
    }

    /// Deterministic transcript of a session, as fed to final extraction.
    pub async fn transcript(&self, session_id: &str) -> Result<String, AppError> {
        Ok(render_transcript(&self.history(session_id).await?))
    }

    pub async fn summarize(&self, session_id: &str) -> Result<String, AppError> {
        let transcript = self.transcript(session_id).await?;
        summarize_transcript(self.oracle.as_ref(), &transcript).await
    }

    /// Maps preferences to careers and explains each one in order.
    async fn complete_recommendation(
        &self,
        preferences: PreferenceRecord,
        session_id: Option<String>,
    ) -> Result<PipelineResult, AppError> {
        let recommendations = map_careers(self.oracle.as_ref(), &preferences).await?;
        let explanations = self.explain_all(&recommendations, &preferences).await?;
        info!(
            "Recommended {} career paths (confidence {:.2})",
            explanations.len(),
            recommendations.confidence_score
        );

        Ok(PipelineResult::Complete {
            session_id,
            preferences,
            recommendations,
            explanations,
        })
    }

    async fn explain_all(
        &self,
        recommendations: &RecommendationSet,
        preferences: &PreferenceRecord,
    ) -> Result<Vec<ExplainedRecommendation>, AppError> {
        let mut explanations = Vec::with_capacity(recommendations.career_paths.len());
        for (i, career_path) in recommendations.career_paths.iter().enumerate() {
            let explanation =
                explain_career(self.oracle.as_ref(), career_path, &preferences.interests).await?;
            explanations.push(ExplainedRecommendation {
                career_path: career_path.clone(),
                explanation,
                match_reason: recommendations.reason_for(i).to_string(),
            });
        }
        Ok(explanations)
    }
}
