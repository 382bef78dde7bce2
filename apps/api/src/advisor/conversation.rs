//! Conversation Driver: one counselor turn at a time over a persisted session.
//!
//! Text generation (`ConversationDriver::take_turn`) is kept apart from the
//! state transition (`classify_reply`), which is a pure function of the reply
//! and the session's turn count.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::advisor::history::HistoryStore;
use crate::advisor::prompts::{COUNSELOR_SYSTEM, READY_SENTINEL};
use crate::advisor::review::{review_reply, ReplyReview};
use crate::errors::AppError;
use crate::llm_client::Oracle;
use crate::models::conversation::{ChatTurn, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationPolicy {
    /// Counselor replies after which a session is treated as ready.
    /// `None` leaves the conversation open until the sentinel appears.
    pub max_turns: Option<u32>,
    /// Run each counselor reply past the response-validation prompt and log the verdict.
    pub review_replies: bool,
}

impl Default for ConversationPolicy {
    fn default() -> Self {
        Self {
            max_turns: Some(10),
            review_replies: false,
        }
    }
}

/// Raw counselor text plus its position in the session.
#[derive(Debug, Clone, PartialEq)]
pub struct CounselorReply {
    pub text: String,
    /// Number of counselor replies in the session, this one included.
    pub turn: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyReason {
    Sentinel,
    TurnCap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    Ready(ReadyReason),
}

/// Decides whether the session has gathered enough information.
///
/// The sentinel match is a case-sensitive substring search.
pub fn classify_reply(reply: &CounselorReply, policy: &ConversationPolicy) -> TurnOutcome {
    if reply.text.contains(READY_SENTINEL) {
        return TurnOutcome::Ready(ReadyReason::Sentinel);
    }
    match policy.max_turns {
        Some(cap) if reply.turn >= cap => TurnOutcome::Ready(ReadyReason::TurnCap),
        _ => TurnOutcome::Continue,
    }
}

pub struct ConversationDriver {
    oracle: Arc<dyn Oracle>,
    history: Arc<dyn HistoryStore>,
    policy: ConversationPolicy,
}

impl ConversationDriver {
    pub fn new(
        oracle: Arc<dyn Oracle>,
        history: Arc<dyn HistoryStore>,
        policy: ConversationPolicy,
    ) -> Self {
        Self {
            oracle,
            history,
            policy,
        }
    }

    /// Sends `message` with the session's prior history to the counselor and
    /// records both sides of the exchange atomically. Nothing is persisted if
    /// the oracle call or either write fails.
    pub async fn take_turn(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<CounselorReply, AppError> {
        let mut messages = self.history.read_all(session_id).await?;
        let prior_replies = messages
            .iter()
            .filter(|t| t.role == Role::Assistant)
            .count() as u32;
        messages.push(ChatTurn::human(message));

        let text = self.oracle.complete(COUNSELOR_SYSTEM, &messages).await?;

        self.history
            .append_exchange(session_id, message, &text)
            .await?;

        let reply = CounselorReply {
            text,
            turn: prior_replies + 1,
        };
        debug!("Session {session_id}: counselor reply #{}", reply.turn);

        if self.policy.review_replies {
            self.log_review(session_id, &reply).await;
        }

        Ok(reply)
    }

    /// Applies the session policy to a reply.
    pub fn classify(&self, session_id: &str, reply: &CounselorReply) -> TurnOutcome {
        let outcome = classify_reply(reply, &self.policy);
        match outcome {
            TurnOutcome::Ready(ReadyReason::Sentinel) => {
                info!("Session {session_id} ready for recommendation after {} turns", reply.turn)
            }
            TurnOutcome::Ready(ReadyReason::TurnCap) => warn!(
                "Session {session_id} reached the {}-turn cap without the sentinel; finalizing",
                reply.turn
            ),
            TurnOutcome::Continue => {}
        }
        outcome
    }

    async fn log_review(&self, session_id: &str, reply: &CounselorReply) {
        match review_reply(self.oracle.as_ref(), &reply.text).await {
            Ok(ReplyReview::Valid) => debug!("Session {session_id}: reply passed review"),
            Ok(ReplyReview::NeedsRevision(reason)) => {
                warn!("Session {session_id}: reply #{} needs revision: {reason}", reply.turn)
            }
            Ok(ReplyReview::Unrecognized(text)) => {
                debug!("Session {session_id}: unrecognized review verdict: {text}")
            }
            Err(e) => warn!("Session {session_id}: reply review failed: {e}"),
        }
    }
}
