use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use crate::models::career::CAREER_COLUMNS;

/// Catalog ordering. Unknown values fall back to `SalaryDesc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CareerSort {
    #[default]
    SalaryDesc,
    SalaryAsc,
    GrowthDesc,
    GrowthAsc,
    OpeningsDesc,
    /// Sorted in memory after health annotation.
    HealthDesc,
    Alphabetical,
}

impl CareerSort {
    pub fn parse(value: &str) -> Self {
        match value {
            "salary-asc" => CareerSort::SalaryAsc,
            "growth-desc" => CareerSort::GrowthDesc,
            "growth-asc" => CareerSort::GrowthAsc,
            "openings-desc" => CareerSort::OpeningsDesc,
            "health-desc" => CareerSort::HealthDesc,
            "alphabetical" => CareerSort::Alphabetical,
            _ => CareerSort::SalaryDesc,
        }
    }

    fn order_by(self) -> &'static str {
        match self {
            CareerSort::SalaryDesc => "salary_median DESC NULLS LAST",
            CareerSort::SalaryAsc => "salary_median ASC NULLS LAST",
            CareerSort::GrowthDesc => "growth_rate_numeric DESC NULLS LAST",
            CareerSort::GrowthAsc => "growth_rate_numeric ASC NULLS LAST",
            CareerSort::OpeningsDesc => "current_openings DESC NULLS LAST",
            CareerSort::HealthDesc | CareerSort::Alphabetical => "title ASC",
        }
    }
}

/// Raw `GET /api/v1/careers` query string.
#[derive(Debug, Default, Deserialize)]
pub struct CareerQuery {
    pub path_type: Option<String>,
    pub category: Option<String>,
    pub min_salary: Option<i32>,
    pub max_salary: Option<i32>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CareerFilters {
    pub path_types: Vec<String>,
    pub categories: Vec<String>,
    pub min_salary: Option<i32>,
    pub max_salary: Option<i32>,
    pub search: Option<String>,
    pub sort: CareerSort,
    pub limit: Option<i64>,
}

impl From<CareerQuery> for CareerFilters {
    fn from(q: CareerQuery) -> Self {
        CareerFilters {
            path_types: split_list(q.path_type.as_deref()),
            categories: split_list(q.category.as_deref()),
            min_salary: q.min_salary,
            max_salary: q.max_salary,
            search: q.search.filter(|s| !s.trim().is_empty()),
            sort: q.sort.as_deref().map(CareerSort::parse).unwrap_or_default(),
            limit: None,
        }
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Escapes LIKE metacharacters so user input matches literally.
pub fn like_pattern(search: &str) -> String {
    let escaped = search
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Builds the catalog SELECT. Every user-supplied value is a bound parameter.
pub fn build_career_query(filters: &CareerFilters) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {CAREER_COLUMNS} FROM careers WHERE TRUE"));

    if !filters.path_types.is_empty() {
        qb.push(" AND path_type = ANY(")
            .push_bind(filters.path_types.clone())
            .push(")");
    }
    if !filters.categories.is_empty() {
        qb.push(" AND category = ANY(")
            .push_bind(filters.categories.clone())
            .push(")");
    }
    if let Some(min) = filters.min_salary {
        qb.push(" AND salary_median >= ").push_bind(min);
    }
    if let Some(max) = filters.max_salary {
        qb.push(" AND salary_median <= ").push_bind(max);
    }
    if let Some(search) = &filters.search {
        let pattern = like_pattern(search);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR category ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR id ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    qb.push(" ORDER BY ").push(filters.sort.order_by());

    if let Some(limit) = filters.limit {
        qb.push(" LIMIT ").push_bind(limit);
    }

    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parse_defaults_to_salary_desc() {
        assert_eq!(CareerSort::parse("growth-asc"), CareerSort::GrowthAsc);
        assert_eq!(CareerSort::parse("health-desc"), CareerSort::HealthDesc);
        assert_eq!(CareerSort::parse("nonsense"), CareerSort::SalaryDesc);
    }

    #[test]
    fn test_query_splits_comma_lists() {
        let filters = CareerFilters::from(CareerQuery {
            path_type: Some("industry-job, research,".to_string()),
            category: Some("tech".to_string()),
            search: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(filters.path_types, vec!["industry-job", "research"]);
        assert_eq!(filters.categories, vec!["tech"]);
        assert!(filters.search.is_none());
        assert_eq!(filters.sort, CareerSort::SalaryDesc);
    }

    #[test]
    fn test_unfiltered_query() {
        let qb = build_career_query(&CareerFilters::default());
        assert!(qb.sql().ends_with("WHERE TRUE ORDER BY salary_median DESC NULLS LAST"));
    }

    #[test]
    fn test_filters_are_bound_parameters() {
        let filters = CareerFilters {
            path_types: vec!["research".to_string()],
            categories: vec!["science".to_string()],
            min_salary: Some(50_000),
            max_salary: Some(150_000),
            search: Some("'; DROP TABLE careers; --".to_string()),
            sort: CareerSort::OpeningsDesc,
            limit: Some(10),
        };
        let qb = build_career_query(&filters);
        let sql = qb.sql();
        assert!(sql.contains("path_type = ANY($1)"));
        assert!(sql.contains("category = ANY($2)"));
        assert!(sql.contains("salary_median >= $3"));
        assert!(sql.contains("salary_median <= $4"));
        assert!(sql.contains("title ILIKE $5"));
        assert!(sql.contains("id ILIKE $8"));
        assert!(sql.contains("ORDER BY current_openings DESC NULLS LAST LIMIT $9"));
        assert!(!sql.contains("DROP TABLE"));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" data "), "%data%");
        assert_eq!(like_pattern("100%_real"), "%100\\%\\_real%");
    }
}
