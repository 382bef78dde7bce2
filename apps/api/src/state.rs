use std::sync::Arc;

use crate::advisor::CareerAdvisor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<CareerAdvisor>,
    /// Seed text used when a session is started without initial input.
    pub seed_conversation: Arc<str>,
}
