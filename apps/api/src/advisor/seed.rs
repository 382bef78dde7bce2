use std::path::Path;

use tracing::{debug, info};

/// Opening exchange used when no recorded conversation is available.
pub const FALLBACK_CONVERSATION: &str = "\
Counselor:
Hi Akanksha, I'm glad you reached out. Are you excited to explore some career options?

Student:
Um, to be honest, I'm really confused. I feel like everyone around me knows what they want to do, and I'm just… lost.";

/// Reads the seed transcript at `path`, falling back to `FALLBACK_CONVERSATION`
/// when the file is missing, unreadable or blank.
pub fn load_seed_conversation(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) if !content.trim().is_empty() => {
            info!("Loaded seed conversation from {}", path.display());
            content.trim().to_string()
        }
        Ok(_) => {
            debug!("Seed file {} is empty; using fallback", path.display());
            FALLBACK_CONVERSATION.to_string()
        }
        Err(e) => {
            debug!("No seed file at {} ({e}); using fallback", path.display());
            FALLBACK_CONVERSATION.to_string()
        }
    }
}
