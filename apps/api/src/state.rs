use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::LlmClient;
use crate::recommend::Recommender;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Pluggable recommender. Default: RuleBasedRecommender.
    pub recommender: Arc<dyn Recommender>,
}
