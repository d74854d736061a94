use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::careers::repository::fetch_careers_by_ids;
use crate::compare::cache::{find_cached, paths_key, store};
use crate::compare::prompts::{
    build_analysis_prompt, ANALYSIS_FALLBACK, ANALYSIS_MAX_TOKENS, ANALYSIS_SYSTEM,
};
use crate::compare::ComparisonSnapshot;
use crate::errors::AppError;
use crate::llm_client::{ChatBackend, ChatMessage, CompletionRequest, ANALYSIS_MODEL};
use crate::models::career::Career;
use crate::models::profile::UserProfile;
use crate::state::AppState;

const DEFAULT_STUDENT: &str = "an undergraduate student exploring career options";

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub path_ids: Vec<String>,
    pub user_profile: Option<UserProfile>,
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub regenerate: bool,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub careers: Vec<Career>,
    pub ai_analysis: String,
    pub cached: bool,
}

/// Normalizes the requested ids and rejects selections of fewer than two paths.
pub fn comparison_key(path_ids: &[String]) -> Result<Vec<String>, AppError> {
    let key: Vec<String> = paths_key(path_ids)
        .into_iter()
        .filter(|id| !id.is_empty())
        .collect();
    if key.len() < 2 {
        return Err(AppError::Validation(
            "At least 2 paths required for comparison".to_string(),
        ));
    }
    Ok(key)
}

/// Asks the analysis model for a trade-off write-up of `careers`.
pub async fn generate_analysis(
    backend: &dyn ChatBackend,
    profile: Option<&UserProfile>,
    careers: &[Career],
) -> Result<String, AppError> {
    let student = profile
        .map(UserProfile::describe)
        .unwrap_or_else(|| DEFAULT_STUDENT.to_string());
    let snapshots: Vec<ComparisonSnapshot> = careers.iter().map(ComparisonSnapshot::from).collect();

    let request = CompletionRequest::new(
        ANALYSIS_MODEL,
        vec![
            ChatMessage::system(ANALYSIS_SYSTEM),
            ChatMessage::user(build_analysis_prompt(&student, &snapshots)),
        ],
    )
    .with_max_tokens(ANALYSIS_MAX_TOKENS);

    let reply = backend.complete(&request).await?;
    Ok(reply
        .content
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| ANALYSIS_FALLBACK.to_string()))
}

/// POST /api/v1/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let key = comparison_key(&req.path_ids)?;

    if let (Some(user_id), false) = (req.user_id, req.regenerate) {
        if let Some(cached) = find_cached(&state.db, user_id, &key).await? {
            info!(%user_id, paths = ?key, "Serving cached comparison");
            let careers = fetch_careers_by_ids(&state.db, &key).await?;
            return Ok(Json(CompareResponse {
                careers,
                ai_analysis: cached.ai_analysis,
                cached: true,
            }));
        }
    }

    let careers = fetch_careers_by_ids(&state.db, &key).await?;
    let missing: Vec<&str> = key
        .iter()
        .filter(|id| !careers.iter().any(|c| &c.id == *id))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::NotFound(format!(
            "Unknown career ids: {}",
            missing.join(", ")
        )));
    }

    let ai_analysis = generate_analysis(&state.llm, req.user_profile.as_ref(), &careers).await?;

    if let Some(user_id) = req.user_id {
        store(&state.db, user_id, &key, &ai_analysis).await?;
        info!(%user_id, paths = ?key, "Stored comparison analysis");
    }

    Ok(Json(CompareResponse {
        careers,
        ai_analysis,
        cached: false,
    }))
}
