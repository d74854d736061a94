// Side-by-side path comparison with a cached AI trade-off analysis.

pub mod cache;
pub mod handlers;
pub mod prompts;

use serde::Serialize;

use crate::models::career::{Career, Category, LayoffRisk};

/// The slice of a career the analysis model sees.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComparisonSnapshot {
    pub id: String,
    pub title: String,
    pub category: Option<Category>,
    pub salary_entry: Option<i32>,
    pub salary_median: Option<i32>,
    pub salary_year5: Option<i32>,
    pub salary_year10: Option<i32>,
    pub growth_rate: Option<String>,
    pub growth_rate_numeric: Option<f64>,
    pub current_openings: Option<i32>,
    pub employment_total: Option<i32>,
    pub minimum_degree: Option<String>,
    pub work_life_balance: Option<String>,
    pub remote_options: Option<String>,
    pub layoff_risk: Option<LayoffRisk>,
    pub time_to_promotion: Option<String>,
    pub career_ceiling: Option<String>,
}

impl From<&Career> for ComparisonSnapshot {
    fn from(c: &Career) -> Self {
        Self {
            id: c.id.clone(),
            title: c.title.clone(),
            category: c.category,
            salary_entry: c.salary_entry,
            salary_median: c.salary_median,
            salary_year5: c.salary_year5,
            salary_year10: c.salary_year10,
            growth_rate: c.growth_rate.clone(),
            growth_rate_numeric: c.growth_rate_numeric,
            current_openings: c.current_openings,
            employment_total: c.employment_total,
            minimum_degree: c.minimum_degree.clone(),
            work_life_balance: c.work_life_balance.clone(),
            remote_options: c.remote_options.clone(),
            layoff_risk: c.layoff_risk,
            time_to_promotion: c.time_to_promotion.clone(),
            career_ceiling: c.career_ceiling.clone(),
        }
    }
}
