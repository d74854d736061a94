use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::warn;

/// Column list shared by every query that loads full career rows.
pub const CAREER_COLUMNS: &str = "id, title, path_type, category, \
    salary_entry, salary_year3, salary_year5, salary_year10, \
    salary_median, salary_p25, salary_p75, salary_p90, \
    current_openings, growth_rate, growth_rate_numeric, employment_total, annual_openings, \
    layoff_risk, minimum_degree, preferred_majors, interests, work_style, industries, \
    skills, typical_employers, related_paths, description, work_life_balance, \
    remote_options, career_ceiling, time_to_promotion, \
    ai_description, ai_trajectory, ai_requirements, is_trending, market_health_score";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Tech,
    Business,
    Healthcare,
    Engineering,
    Science,
    Law,
    Education,
    Creative,
    Alternative,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Tech,
        Category::Business,
        Category::Healthcare,
        Category::Engineering,
        Category::Science,
        Category::Law,
        Category::Education,
        Category::Creative,
        Category::Alternative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tech => "tech",
            Category::Business => "business",
            Category::Healthcare => "healthcare",
            Category::Engineering => "engineering",
            Category::Science => "science",
            Category::Law => "law",
            Category::Education => "education",
            Category::Creative => "creative",
            Category::Alternative => "alternative",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PathType {
    IndustryJob,
    GraduateSchool,
    Research,
    Fellowship,
    ProfessionalSchool,
    Alternative,
}

impl PathType {
    pub const ALL: [PathType; 6] = [
        PathType::IndustryJob,
        PathType::GraduateSchool,
        PathType::Research,
        PathType::Fellowship,
        PathType::ProfessionalSchool,
        PathType::Alternative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PathType::IndustryJob => "industry-job",
            PathType::GraduateSchool => "graduate-school",
            PathType::Research => "research",
            PathType::Fellowship => "fellowship",
            PathType::ProfessionalSchool => "professional-school",
            PathType::Alternative => "alternative",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayoffRisk {
    Low,
    Medium,
    High,
}

impl LayoffRisk {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(LayoffRisk::Low),
            "medium" => Some(LayoffRisk::Medium),
            "high" => Some(LayoffRisk::High),
            _ => None,
        }
    }
}

/// Raw `careers` row. Every nullable column stays optional here; defaulting
/// happens in the `From<CareerRow> for Career` conversion.
#[derive(Debug, Clone, FromRow)]
pub struct CareerRow {
    pub id: String,
    pub title: Option<String>,
    pub path_type: Option<String>,
    pub category: Option<String>,
    pub salary_entry: Option<i32>,
    pub salary_year3: Option<i32>,
    pub salary_year5: Option<i32>,
    pub salary_year10: Option<i32>,
    pub salary_median: Option<i32>,
    pub salary_p25: Option<i32>,
    pub salary_p75: Option<i32>,
    pub salary_p90: Option<i32>,
    pub current_openings: Option<i32>,
    pub growth_rate: Option<String>,
    pub growth_rate_numeric: Option<f64>,
    pub employment_total: Option<i32>,
    pub annual_openings: Option<i32>,
    pub layoff_risk: Option<String>,
    pub minimum_degree: Option<String>,
    pub preferred_majors: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub work_style: Option<Vec<String>>,
    pub industries: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    pub typical_employers: Option<Vec<String>>,
    pub related_paths: Option<Vec<String>>,
    pub description: Option<String>,
    pub work_life_balance: Option<String>,
    pub remote_options: Option<String>,
    pub career_ceiling: Option<String>,
    pub time_to_promotion: Option<String>,
    pub ai_description: Option<String>,
    pub ai_trajectory: Option<String>,
    pub ai_requirements: Option<String>,
    pub is_trending: Option<bool>,
    pub market_health_score: Option<f64>,
}

/// A career path as the rest of the service sees it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Career {
    pub id: String,
    pub title: String,
    pub path_type: Option<PathType>,
    pub category: Option<Category>,

    pub salary_entry: Option<i32>,
    pub salary_year3: Option<i32>,
    pub salary_year5: Option<i32>,
    pub salary_year10: Option<i32>,
    pub salary_median: Option<i32>,
    pub salary_p25: Option<i32>,
    pub salary_p75: Option<i32>,
    pub salary_p90: Option<i32>,

    pub current_openings: Option<i32>,
    pub growth_rate: Option<String>,
    pub growth_rate_numeric: Option<f64>,
    pub employment_total: Option<i32>,
    pub annual_openings: Option<i32>,
    pub layoff_risk: Option<LayoffRisk>,

    pub minimum_degree: Option<String>,
    pub preferred_majors: Vec<String>,
    pub interests: Vec<String>,
    pub work_style: Vec<String>,
    pub industries: Vec<String>,
    pub skills: Vec<String>,
    pub typical_employers: Vec<String>,
    pub related_paths: Vec<String>,

    pub description: Option<String>,
    pub work_life_balance: Option<String>,
    pub remote_options: Option<String>,
    pub career_ceiling: Option<String>,
    pub time_to_promotion: Option<String>,

    pub ai_description: Option<String>,
    pub ai_trajectory: Option<String>,
    pub ai_requirements: Option<String>,

    pub is_trending: bool,
    pub market_health_score: Option<f64>,
}

impl From<CareerRow> for Career {
    fn from(row: CareerRow) -> Self {
        let category = row.category.as_deref().and_then(|raw| {
            let parsed = Category::parse(raw);
            if parsed.is_none() {
                warn!(career_id = %row.id, category = raw, "Unrecognized career category");
            }
            parsed
        });
        let path_type = row.path_type.as_deref().and_then(|raw| {
            let parsed = PathType::parse(raw);
            if parsed.is_none() {
                warn!(career_id = %row.id, path_type = raw, "Unrecognized path type");
            }
            parsed
        });
        let layoff_risk = row.layoff_risk.as_deref().and_then(LayoffRisk::parse);

        Career {
            title: row.title.unwrap_or_default(),
            path_type,
            category,
            salary_entry: row.salary_entry,
            salary_year3: row.salary_year3,
            salary_year5: row.salary_year5,
            salary_year10: row.salary_year10,
            salary_median: row.salary_median,
            salary_p25: row.salary_p25,
            salary_p75: row.salary_p75,
            salary_p90: row.salary_p90,
            current_openings: row.current_openings,
            growth_rate: row.growth_rate,
            growth_rate_numeric: row.growth_rate_numeric,
            employment_total: row.employment_total,
            annual_openings: row.annual_openings,
            layoff_risk,
            minimum_degree: row.minimum_degree,
            preferred_majors: row.preferred_majors.unwrap_or_default(),
            interests: row.interests.unwrap_or_default(),
            work_style: row.work_style.unwrap_or_default(),
            industries: row.industries.unwrap_or_default(),
            skills: row.skills.unwrap_or_default(),
            typical_employers: row.typical_employers.unwrap_or_default(),
            related_paths: row.related_paths.unwrap_or_default(),
            description: row.description,
            work_life_balance: row.work_life_balance,
            remote_options: row.remote_options,
            career_ceiling: row.career_ceiling,
            time_to_promotion: row.time_to_promotion,
            ai_description: row.ai_description,
            ai_trajectory: row.ai_trajectory,
            ai_requirements: row.ai_requirements,
            is_trending: row.is_trending.unwrap_or(false),
            market_health_score: row.market_health_score,
            id: row.id,
        }
    }
}
