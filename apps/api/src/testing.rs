//! Test doubles shared by unit tests across the crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LlmError, Oracle};
use crate::models::conversation::ChatTurn;

/// One recorded oracle invocation.
#[derive(Debug, Clone)]
pub struct OracleCall {
    pub system: String,
    pub messages: Vec<ChatTurn>,
}

impl OracleCall {
    /// Content of the final message, i.e. the prompt for single-shot calls.
    pub fn last_content(&self) -> &str {
        self.messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }
}

/// Oracle that replays a FIFO queue of canned replies and logs every call.
/// An exhausted queue answers with `LlmError::EmptyContent`.
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<String>>,
    pub calls: Mutex<Vec<OracleCall>>,
}

impl ScriptedOracle {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<OracleCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn complete(&self, system: &str, messages: &[ChatTurn]) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(OracleCall {
            system: system.to_string(),
            messages: messages.to_vec(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyContent)
    }
}
