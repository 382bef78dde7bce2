//! Compass: a conversational career-advising service.
//!
//! The `advisor` module holds the recommendation pipeline; the binaries
//! (`compass` HTTP service, `compass-cli` terminal chat) are thin shells over it.

pub mod advisor;
pub mod config;
pub mod db;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
