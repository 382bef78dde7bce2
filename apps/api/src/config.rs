use anyhow::{bail, Context, Result};

use crate::advisor::conversation::ConversationPolicy;

const DEFAULT_DATABASE_URL: &str = "sqlite://career_conversations.db?mode=rwc";
const DEFAULT_MAX_TURNS: u32 = 10;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Sampling temperature passed on every oracle call.
    pub llm_temperature: f32,
    /// `None` keeps a conversation open until the counselor emits the sentinel.
    pub max_conversation_turns: Option<u32>,
    pub review_counselor_replies: bool,
    pub conversation_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_temperature = std::env::var("LLM_TEMPERATURE")
            .unwrap_or_else(|_| "0.7".to_string())
            .parse::<f32>()
            .context("LLM_TEMPERATURE must be a number")?;
        if !(0.0..=1.0).contains(&llm_temperature) {
            bail!("LLM_TEMPERATURE must be between 0.0 and 1.0, got {llm_temperature}");
        }

        let max_turns = std::env::var("MAX_CONVERSATION_TURNS")
            .unwrap_or_else(|_| DEFAULT_MAX_TURNS.to_string())
            .parse::<u32>()
            .context("MAX_CONVERSATION_TURNS must be a non-negative integer")?;

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_temperature,
            max_conversation_turns: turn_cap(max_turns),
            review_counselor_replies: parse_flag(
                std::env::var("REVIEW_COUNSELOR_REPLIES").ok().as_deref(),
            ),
            conversation_file: std::env::var("CONVERSATION_FILE")
                .unwrap_or_else(|_| "conversation.txt".to_string()),
        })
    }

    pub fn conversation_policy(&self) -> ConversationPolicy {
        ConversationPolicy {
            max_turns: self.max_conversation_turns,
            review_replies: self.review_counselor_replies,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// A cap of zero disables the limit.
fn turn_cap(max_turns: u32) -> Option<u32> {
    (max_turns > 0).then_some(max_turns)
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_truthy_values() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some(" YES ")));
        assert!(parse_flag(Some("1")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_zero_turn_cap_means_unbounded() {
        assert_eq!(turn_cap(0), None);
        assert_eq!(turn_cap(10), Some(10));
    }
}
