use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MarketTrendRow {
    pub career_id: String,
    pub date: NaiveDate,
    pub average_salary: Option<i32>,
    pub employment_count: Option<i32>,
    pub source: Option<String>,
}
