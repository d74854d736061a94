use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::careers::repository::fetch_all_careers;
use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::recommend::engine::{min_score_for_year, DEFAULT_LIMIT};
use crate::recommend::ScoredCareer;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub profile: UserProfile,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<ScoredCareer>,
    pub min_score: u32,
    pub backend: &'static str,
}

/// POST /api/v1/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(req): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let careers = fetch_all_careers(&state.db).await?;
    let limit = req.limit.unwrap_or(DEFAULT_LIMIT);
    let recommendations = state.recommender.recommend(&careers, &req.profile, limit);

    info!(
        candidates = careers.len(),
        returned = recommendations.len(),
        year = %req.profile.year,
        "Computed recommendations"
    );

    Ok(Json(RecommendationResponse {
        recommendations,
        min_score: min_score_for_year(&req.profile.year),
        backend: state.recommender.backend(),
    }))
}
