use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compass::advisor::history::SqliteHistoryStore;
use compass::advisor::seed::load_seed_conversation;
use compass::advisor::CareerAdvisor;
use compass::config::Config;
use compass::db::create_pool;
use compass::llm_client::{self, LlmClient};
use compass::routes::build_router;
use compass::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize chat history store
    let db = create_pool(&config.database_url).await?;
    let history = Arc::new(SqliteHistoryStore::new(db).await?);

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_temperature)?;
    info!(
        "LLM client initialized (model: {}, temperature: {})",
        llm_client::MODEL,
        config.llm_temperature
    );

    let policy = config.conversation_policy();
    info!("Conversation policy: {:?}", policy);

    let state = AppState {
        advisor: Arc::new(CareerAdvisor::new(Arc::new(llm), history, policy)),
        seed_conversation: Arc::from(load_seed_conversation(&config.conversation_file)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
