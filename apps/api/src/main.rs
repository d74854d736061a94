mod analytics;
mod careers;
mod chat;
mod compare;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod profiles;
mod recommend;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::recommend::{Recommender, RuleBasedRecommender};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first; missing required env vars abort startup.
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PathIQ API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url, config.db_max_connections).await?;

    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_api_url.clone())?;
    info!(
        "LLM client initialized (chat: {}, analysis: {})",
        llm_client::CHAT_MODEL,
        llm_client::ANALYSIS_MODEL
    );

    let recommender: Arc<dyn Recommender> = Arc::new(RuleBasedRecommender);
    info!("Recommender backend: {}", recommender.backend());

    let state = AppState {
        db,
        llm,
        recommender,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
