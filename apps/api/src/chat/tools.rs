//! Database tools the advisor model can call mid-conversation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::careers::query::{CareerFilters, CareerSort};
use crate::careers::repository::{fetch_career, fetch_careers, fetch_careers_by_ids};
use crate::compare::ComparisonSnapshot;
use crate::errors::AppError;
use crate::models::career::{Career, Category, LayoffRisk, PathType};

const SEARCH_LIMIT: i64 = 10;

/// Function definitions offered to the model on every advisor call.
pub fn tool_definitions() -> Vec<Value> {
    vec![
        json!({
            "type": "function",
            "function": {
                "name": "searchCareers",
                "description": "Search career paths by keyword, category, or criteria",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Search keyword" },
                        "category": {
                            "type": "string",
                            "description": "Career category (tech, business, healthcare, engineering, science, law, education, creative, alternative)"
                        },
                        "minSalary": { "type": "number", "description": "Minimum median salary filter" },
                        "pathType": {
                            "type": "string",
                            "description": "Path type (industry-job, graduate-school, research, professional-school, alternative)"
                        }
                    }
                }
            }
        }),
        json!({
            "type": "function",
            "function": {
                "name": "getCareerDetails",
                "description": "Get detailed information about a specific career path",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "careerId": {
                            "type": "string",
                            "description": "Career ID (e.g., software-engineer, data-scientist)"
                        }
                    },
                    "required": ["careerId"]
                }
            }
        }),
        json!({
            "type": "function",
            "function": {
                "name": "compareCareers",
                "description": "Compare 2-3 career paths side by side",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "careerIds": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Array of career IDs to compare"
                        }
                    },
                    "required": ["careerIds"]
                }
            }
        }),
    ]
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchArgs {
    pub query: Option<String>,
    pub category: Option<String>,
    pub min_salary: Option<f64>,
    pub path_type: Option<String>,
}

impl SearchArgs {
    /// A zero salary or a blank string means no filter.
    fn filters(&self) -> CareerFilters {
        let present = |value: &&String| !value.trim().is_empty();
        CareerFilters {
            path_types: self.path_type.iter().filter(present).cloned().collect(),
            categories: self.category.iter().filter(present).cloned().collect(),
            min_salary: self
                .min_salary
                .filter(|v| *v > 0.0)
                .map(|v| v.round() as i32),
            search: self.query.clone().filter(|q| !q.trim().is_empty()),
            sort: CareerSort::SalaryDesc,
            limit: Some(SEARCH_LIMIT),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailsArgs {
    career_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareArgs {
    career_ids: Vec<String>,
}

/// A validated tool invocation.
#[derive(Debug, PartialEq)]
pub enum ToolRequest {
    Search(SearchArgs),
    Details { career_id: String },
    Compare { career_ids: Vec<String> },
}

/// Parses a model-issued call. The error string is sent back to the model.
pub fn parse_call(name: &str, arguments: &str) -> Result<ToolRequest, String> {
    let arguments = if arguments.trim().is_empty() { "{}" } else { arguments };
    let invalid = |e: serde_json::Error| format!("Invalid arguments for {name}: {e}");

    match name {
        "searchCareers" => serde_json::from_str(arguments)
            .map(ToolRequest::Search)
            .map_err(invalid),
        "getCareerDetails" => serde_json::from_str::<DetailsArgs>(arguments)
            .map(|a| ToolRequest::Details {
                career_id: a.career_id,
            })
            .map_err(invalid),
        "compareCareers" => serde_json::from_str::<CompareArgs>(arguments)
            .map(|a| ToolRequest::Compare {
                career_ids: a.career_ids,
            })
            .map_err(invalid),
        other => Err(format!("Unknown tool: {other}")),
    }
}

/// Compact search row; full records come from `getCareerDetails`.
#[derive(Debug, Serialize)]
struct SearchHit {
    id: String,
    title: String,
    category: Option<Category>,
    path_type: Option<PathType>,
    salary_entry: Option<i32>,
    salary_median: Option<i32>,
    growth_rate: Option<String>,
    growth_rate_numeric: Option<f64>,
    current_openings: Option<i32>,
    description: Option<String>,
    layoff_risk: Option<LayoffRisk>,
    is_trending: bool,
    market_health_score: Option<f64>,
}

impl From<Career> for SearchHit {
    fn from(c: Career) -> Self {
        Self {
            id: c.id,
            title: c.title,
            category: c.category,
            path_type: c.path_type,
            salary_entry: c.salary_entry,
            salary_median: c.salary_median,
            growth_rate: c.growth_rate,
            growth_rate_numeric: c.growth_rate_numeric,
            current_openings: c.current_openings,
            description: c.description,
            layoff_risk: c.layoff_risk,
            is_trending: c.is_trending,
            market_health_score: c.market_health_score,
        }
    }
}

/// Runs tool calls on behalf of the chat loop.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Returns the JSON result to hand back to the model.
    /// Bad input becomes an `{"error": ...}` value; only infrastructure failures are `Err`.
    async fn execute(&self, name: &str, arguments: &str) -> Result<Value, AppError>;
}

/// `ToolExecutor` backed by the career catalog.
pub struct CareerTools {
    db: PgPool,
}

impl CareerTools {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ToolExecutor for CareerTools {
    async fn execute(&self, name: &str, arguments: &str) -> Result<Value, AppError> {
        let request = match parse_call(name, arguments) {
            Ok(request) => request,
            Err(message) => {
                warn!(tool = name, "Rejected tool call: {message}");
                return Ok(json!({ "error": message }));
            }
        };
        debug!(?request, "Executing tool call");

        let result = match request {
            ToolRequest::Search(args) => {
                let hits: Vec<SearchHit> = fetch_careers(&self.db, &args.filters())
                    .await?
                    .into_iter()
                    .map(SearchHit::from)
                    .collect();
                serde_json::to_value(hits)
            }
            ToolRequest::Details { career_id } => match fetch_career(&self.db, &career_id).await? {
                Some(career) => serde_json::to_value(career),
                None => Ok(json!({ "error": format!("Career not found: {career_id}") })),
            },
            ToolRequest::Compare { career_ids } => {
                let snapshots: Vec<ComparisonSnapshot> =
                    fetch_careers_by_ids(&self.db, &career_ids)
                        .await?
                        .iter()
                        .map(ComparisonSnapshot::from)
                        .collect();
                serde_json::to_value(snapshots)
            }
        };

        result.map_err(|e| AppError::Internal(e.into()))
    }
}
