use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{ProfileColumns, UserProfile, UserProfileRow};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub has_profile: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileResponse {
    fn new(profile: UserProfile, updated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            has_profile: profile.has_data(),
            profile,
            updated_at,
        }
    }
}

/// Work-value sliders are 1–5.
pub fn validate_profile(profile: &UserProfile) -> Result<(), AppError> {
    let v = profile.values;
    let sliders = [
        ("compensation", v.compensation),
        ("impact", v.impact),
        ("flexibility", v.flexibility),
        ("stability", v.stability),
    ];
    match sliders.iter().find(|(_, value)| !(1..=5).contains(value)) {
        Some((name, value)) => Err(AppError::Validation(format!(
            "values.{name} must be between 1 and 5, got {value}"
        ))),
        None => Ok(()),
    }
}

pub async fn load_profile(db: &PgPool, user_id: Uuid) -> Result<ProfileResponse, AppError> {
    let row: Option<UserProfileRow> = sqlx::query_as(
        "SELECT name, year, major, interests, profile_values, location_preferences, updated_at \
         FROM user_profiles WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(match row {
        Some(row) => {
            let updated_at = row.updated_at;
            ProfileResponse::new(UserProfile::from(row), Some(updated_at))
        }
        None => ProfileResponse::new(UserProfile::default(), None),
    })
}

pub async fn save_profile(
    db: &PgPool,
    user_id: Uuid,
    profile: &UserProfile,
) -> Result<DateTime<Utc>, AppError> {
    let cols = ProfileColumns::from(profile);
    let updated_at: DateTime<Utc> = sqlx::query_scalar(
        r#"
        INSERT INTO user_profiles
            (id, name, year, major, interests, profile_values, location_preferences, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, now())
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            year = EXCLUDED.year,
            major = EXCLUDED.major,
            interests = EXCLUDED.interests,
            profile_values = EXCLUDED.profile_values,
            location_preferences = EXCLUDED.location_preferences,
            updated_at = EXCLUDED.updated_at
        RETURNING updated_at
        "#,
    )
    .bind(user_id)
    .bind(cols.name)
    .bind(cols.year)
    .bind(cols.major)
    .bind(cols.interests)
    .bind(cols.profile_values)
    .bind(cols.location_preferences)
    .fetch_one(db)
    .await?;

    Ok(updated_at)
}

/// GET /api/v1/profiles/:user_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(load_profile(&state.db, user_id).await?))
}

/// PUT /api/v1/profiles/:user_id
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<ProfileResponse>, AppError> {
    validate_profile(&profile)?;
    let updated_at = save_profile(&state.db, user_id, &profile).await?;
    info!(%user_id, "Saved user profile");
    Ok(Json(ProfileResponse::new(profile, Some(updated_at))))
}
