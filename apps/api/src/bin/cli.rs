//! Terminal chat with the career counselor.
//!
//! Reads one line at a time from stdin until recommendations are produced.
//! Logs go to stderr so stdout carries only the conversation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use compass::advisor::history::SqliteHistoryStore;
use compass::advisor::seed::load_seed_conversation;
use compass::advisor::{CareerAdvisor, ExplainedRecommendation, PipelineResult};
use compass::config::Config;
use compass::db::create_pool;
use compass::llm_client::LlmClient;

#[derive(Debug, Parser)]
#[command(name = "compass-cli", version, about = "Chat with a career counselor")]
struct Args {
    /// Seed transcript; defaults to CONVERSATION_FILE (conversation.txt)
    #[arg(long)]
    conversation: Option<PathBuf>,

    /// Session id to use for a new conversation
    #[arg(long)]
    session_id: Option<String>,

    /// Resume an existing session instead of starting from the seed transcript
    #[arg(long, conflicts_with_all = ["session_id", "single_shot"])]
    resume: Option<String>,

    /// Run the non-interactive pipeline once and exit
    #[arg(long)]
    single_shot: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let db = create_pool(&config.database_url).await?;
    let history = Arc::new(SqliteHistoryStore::new(db).await?);
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_temperature)?;
    let advisor = CareerAdvisor::new(Arc::new(llm), history, config.conversation_policy());

    let seed_path = args
        .conversation
        .unwrap_or_else(|| PathBuf::from(&config.conversation_file));

    let session_id = if let Some(session_id) = args.resume {
        info!("Resuming session {session_id}");
        for turn in advisor.history(&session_id).await? {
            println!("{}: {}", turn.role, turn.content);
        }
        session_id
    } else {
        let seed = load_seed_conversation(&seed_path);
        let result = if args.single_shot {
            advisor.recommend_once(&seed).await?
        } else {
            advisor.begin(&seed, args.session_id).await?
        };

        match result {
            PipelineResult::ConversationStarted {
                response,
                session_id,
                ..
            } => {
                println!("Bot: {response}");
                session_id
            }
            PipelineResult::Complete { explanations, .. } => {
                println!("Direct recommendations generated!");
                print_recommendations(&explanations);
                return Ok(());
            }
            PipelineResult::NeedsClarification { questions, .. } => {
                println!("Need more information. Questions to ask:");
                println!("{questions}");
                return Ok(());
            }
            other => {
                println!("Unexpected pipeline state: {}", other.status());
                return Ok(());
            }
        }
    };

    chat_loop(&advisor, &session_id).await
}

async fn chat_loop(advisor: &CareerAdvisor, session_id: &str) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"You: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!();
            info!("Input closed; session {session_id} left open");
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }

        match advisor.continue_conversation(session_id, &line).await? {
            PipelineResult::ContinueConversation { response, .. } => {
                println!("Bot: {response}");
            }
            PipelineResult::ReadyForRecommendation { response, .. } => {
                println!("Bot: {response}");
                if let PipelineResult::Complete { explanations, .. } =
                    advisor.finalize(session_id).await?
                {
                    println!("\nFinal Career Recommendations:");
                    print_recommendations(&explanations);
                }
                return Ok(());
            }
            other => println!("Unexpected pipeline state: {}", other.status()),
        }
    }
}

fn print_recommendations(explanations: &[ExplainedRecommendation]) {
    for rec in explanations {
        println!("\n- {}", rec.career_path);
        println!("  Explanation: {}", rec.explanation);
        println!("  Match Reason: {}", rec.match_reason);
    }
}
