use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ComparisonRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub paths_compared: Vec<String>,
    pub ai_analysis: String,
    pub created_at: DateTime<Utc>,
}
