use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analytics::health::{health_breakdown, HealthBreakdown};
use crate::analytics::insights::{build_insights, InsightsReport};
use crate::analytics::salary::{SalaryMarker, SalaryPercentiles};
use crate::analytics::validation::{validate_careers, DataWarning};
use crate::careers::query::{CareerFilters, CareerQuery};
use crate::careers::repository::{
    fetch_all_careers, fetch_career, fetch_careers, fetch_market_trends,
};
use crate::errors::AppError;
use crate::models::career::Career;
use crate::models::trend::MarketTrendRow;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CareerDetail {
    pub career: Career,
    pub health: HealthBreakdown,
    pub salary_markers: Vec<SalaryMarker>,
}

#[derive(Deserialize)]
pub struct PercentileQuery {
    pub percentile: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PercentileResponse {
    pub career_id: String,
    pub percentile: f64,
    /// `None` when fewer than two salary percentiles are published.
    pub salary: Option<i64>,
}

#[derive(Serialize)]
pub struct DataQualityReport {
    pub checked: usize,
    pub warnings: Vec<DataWarning>,
}

/// Percentiles are only meaningful strictly inside (0, 100).
pub fn validate_percentile(percentile: f64) -> Result<f64, AppError> {
    if percentile.is_finite() && percentile > 0.0 && percentile < 100.0 {
        Ok(percentile)
    } else {
        Err(AppError::Validation(format!(
            "percentile must be between 0 and 100 (exclusive), got {percentile}"
        )))
    }
}

async fn require_career(state: &AppState, id: &str) -> Result<Career, AppError> {
    fetch_career(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Career {id} not found")))
}

/// GET /api/v1/careers
pub async fn handle_list_careers(
    State(state): State<AppState>,
    Query(query): Query<CareerQuery>,
) -> Result<Json<Vec<Career>>, AppError> {
    let filters = CareerFilters::from(query);
    Ok(Json(fetch_careers(&state.db, &filters).await?))
}

/// GET /api/v1/careers/:id
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CareerDetail>, AppError> {
    let career = require_career(&state, &id).await?;
    let health = health_breakdown(&career);
    let salary_markers = SalaryPercentiles::from_career(&career).markers();
    Ok(Json(CareerDetail {
        career,
        health,
        salary_markers,
    }))
}

/// GET /api/v1/careers/:id/salary?percentile=p
pub async fn handle_salary_percentile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PercentileQuery>,
) -> Result<Json<PercentileResponse>, AppError> {
    let percentile = validate_percentile(params.percentile)?;
    let career = require_career(&state, &id).await?;
    let salary = SalaryPercentiles::from_career(&career).at(percentile);
    Ok(Json(PercentileResponse {
        career_id: career.id,
        percentile,
        salary,
    }))
}

/// GET /api/v1/market-trends/:career_id
pub async fn handle_market_trends(
    State(state): State<AppState>,
    Path(career_id): Path<String>,
) -> Result<Json<Vec<MarketTrendRow>>, AppError> {
    Ok(Json(fetch_market_trends(&state.db, &career_id).await?))
}

/// GET /api/v1/insights
pub async fn handle_insights(
    State(state): State<AppState>,
) -> Result<Json<InsightsReport>, AppError> {
    let careers = fetch_all_careers(&state.db).await?;
    Ok(Json(build_insights(&careers)))
}

/// GET /api/v1/data-quality
pub async fn handle_data_quality(
    State(state): State<AppState>,
) -> Result<Json<DataQualityReport>, AppError> {
    let careers = fetch_all_careers(&state.db).await?;
    let warnings = validate_careers(&careers);
    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Career data-quality warnings");
    }
    Ok(Json(DataQualityReport {
        checked: careers.len(),
        warnings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_bounds() {
        assert!(validate_percentile(62.5).is_ok());
        assert!(validate_percentile(0.0).is_err());
        assert!(validate_percentile(100.0).is_err());
        assert!(validate_percentile(-3.0).is_err());
        assert!(validate_percentile(f64::NAN).is_err());
    }
}
