use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodmeter_api::analysis::llm::LlmMoodAnalyzer;
use moodmeter_api::composer::SessionRegistry;
use moodmeter_api::config::Config;
use moodmeter_api::db::create_pool;
use moodmeter_api::entries::{EntryStore, InMemoryEntryStore, PgEntryStore};
use moodmeter_api::llm_client::LlmClient;
use moodmeter_api::routes::build_router;
use moodmeter_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Moodmeter API v{}", env!("CARGO_PKG_VERSION"));

    // Entry storage
    let entries: Arc<dyn EntryStore> = match &config.database_url {
        Some(url) => Arc::new(PgEntryStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; entries are kept in memory and lost on exit");
            Arc::new(InMemoryEntryStore::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.claude_model.clone())?;
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        analyzer: Arc::new(LlmMoodAnalyzer::new(llm)),
        entries,
        sessions: SessionRegistry::new(config.session_ttl),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
