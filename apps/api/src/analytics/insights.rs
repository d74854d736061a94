use std::collections::HashMap;

use serde::Serialize;

use crate::models::career::{Career, Category};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogStats {
    pub total_paths: usize,
    pub total_openings: i64,
    pub trending_count: usize,
    pub avg_entry_salary: i64,
    pub avg_median_salary: i64,
    pub total_employment: i64,
    /// Mean projected growth in percent, one decimal place.
    pub avg_growth: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryAverage {
    pub category: Category,
    pub avg_salary: i64,
    pub count: usize,
}

/// One point on the salary-vs-openings scatter.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SweetSpotPoint {
    pub id: String,
    pub title: String,
    pub category: Option<Category>,
    pub salary: i32,
    pub openings: i32,
    pub growth: f64,
    pub health_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightsReport {
    pub stats: CatalogStats,
    pub category_averages: Vec<CategoryAverage>,
    pub sweet_spot: Vec<SweetSpotPoint>,
}

/// Sum of an optional integer field, missing values counted as zero.
fn sum_of(careers: &[Career], field: fn(&Career) -> Option<i32>) -> i64 {
    careers.iter().map(|c| i64::from(field(c).unwrap_or(0))).sum()
}

/// Catalog-wide totals and averages. Every average runs over the whole
/// catalog with missing values as zero, and is zero for an empty catalog.
pub fn catalog_stats(careers: &[Career]) -> CatalogStats {
    let divisor = careers.len().max(1) as f64;
    let mean = |field: fn(&Career) -> Option<i32>| {
        (sum_of(careers, field) as f64 / divisor).round() as i64
    };

    let growth_sum: f64 = careers
        .iter()
        .map(|c| c.growth_rate_numeric.unwrap_or(0.0))
        .sum();

    CatalogStats {
        total_paths: careers.len(),
        total_openings: sum_of(careers, |c| c.current_openings),
        trending_count: careers.iter().filter(|c| c.is_trending).count(),
        avg_entry_salary: mean(|c| c.salary_entry),
        avg_median_salary: mean(|c| c.salary_median),
        total_employment: sum_of(careers, |c| c.employment_total),
        avg_growth: (growth_sum / divisor * 10.0).round() / 10.0,
    }
}

/// Average median salary per category, highest first. Careers without a
/// category are left out; a missing median counts as zero.
pub fn category_salary_averages(careers: &[Career]) -> Vec<CategoryAverage> {
    let mut sums: HashMap<Category, (i64, usize)> = HashMap::new();
    for career in careers {
        let Some(category) = career.category else {
            continue;
        };
        let entry = sums.entry(category).or_insert((0, 0));
        entry.0 += i64::from(career.salary_median.unwrap_or(0));
        entry.1 += 1;
    }

    let mut averages: Vec<CategoryAverage> = sums
        .into_iter()
        .map(|(category, (sum, count))| CategoryAverage {
            category,
            avg_salary: (sum as f64 / count as f64).round() as i64,
            count,
        })
        .collect();

    // Category order breaks ties so output does not depend on hash order.
    averages.sort_by(|a, b| {
        b.avg_salary
            .cmp(&a.avg_salary)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    averages
}

pub fn sweet_spot(careers: &[Career]) -> Vec<SweetSpotPoint> {
    careers
        .iter()
        .filter_map(|c| {
            let salary = c.salary_median.filter(|s| *s != 0)?;
            let openings = c.current_openings.filter(|o| *o != 0)?;
            Some(SweetSpotPoint {
                id: c.id.clone(),
                title: c.title.clone(),
                category: c.category,
                salary,
                openings,
                growth: c.growth_rate_numeric.unwrap_or(0.0),
                health_score: c.market_health_score.unwrap_or(0.0),
            })
        })
        .collect()
}

pub fn build_insights(careers: &[Career]) -> InsightsReport {
    InsightsReport {
        stats: catalog_stats(careers),
        category_averages: category_salary_averages(careers),
        sweet_spot: sweet_spot(careers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn career(id: &str, category: Option<Category>, median: Option<i32>) -> Career {
        Career {
            id: id.to_string(),
            title: id.to_uppercase(),
            category,
            salary_median: median,
            ..Default::default()
        }
    }

    #[test]
    fn test_stats_on_empty_catalog() {
        let stats = catalog_stats(&[]);
        assert_eq!(stats.total_paths, 0);
        assert_eq!(stats.total_openings, 0);
        assert_eq!(stats.avg_entry_salary, 0);
        assert_eq!(stats.avg_median_salary, 0);
        assert_eq!(stats.total_employment, 0);
        assert_eq!(stats.avg_growth, 0.0);
    }

    #[test]
    fn test_stats_treat_missing_values_as_zero() {
        let careers = vec![
            Career {
                salary_entry: Some(60_000),
                current_openings: Some(1_000),
                is_trending: true,
                ..career("a", None, Some(90_000))
            },
            Career {
                salary_entry: None,
                current_openings: None,
                ..career("b", None, None)
            },
        ];
        let stats = catalog_stats(&careers);
        assert_eq!(stats.total_paths, 2);
        assert_eq!(stats.total_openings, 1_000);
        assert_eq!(stats.trending_count, 1);
        assert_eq!(stats.avg_entry_salary, 30_000);
        assert_eq!(stats.avg_median_salary, 45_000);
    }

    #[test]
    fn test_median_average_spans_whole_catalog() {
        let careers = vec![
            career("a", None, Some(100_000)),
            career("b", None, None),
        ];
        assert_eq!(catalog_stats(&careers).avg_median_salary, 50_000);
    }

    #[test]
    fn test_employment_total_skips_missing_counts() {
        let careers = vec![
            Career {
                employment_total: Some(1_500_000),
                ..career("a", None, None)
            },
            Career {
                employment_total: None,
                ..career("b", None, None)
            },
            Career {
                employment_total: Some(2_000_000_000),
                ..career("c", None, None)
            },
        ];
        assert_eq!(catalog_stats(&careers).total_employment, 2_001_500_000);
    }

    #[test]
    fn test_average_growth_counts_missing_as_zero_and_rounds() {
        let careers = vec![
            Career {
                growth_rate_numeric: Some(10.0),
                ..career("a", None, None)
            },
            Career {
                growth_rate_numeric: Some(-3.0),
                ..career("b", None, None)
            },
            Career {
                growth_rate_numeric: None,
                ..career("c", None, None)
            },
        ];
        // (10 - 3 + 0) / 3 = 2.333...
        assert_eq!(catalog_stats(&careers).avg_growth, 2.3);
    }

    #[test]
    fn test_category_averages_sorted_descending() {
        let careers = vec![
            career("nurse", Some(Category::Healthcare), Some(80_000)),
            career("swe", Some(Category::Tech), Some(130_000)),
            career("ds", Some(Category::Tech), Some(110_000)),
            career("np", Some(Category::Healthcare), None),
            career("mystery", None, Some(1_000_000)),
        ];
        let averages = category_salary_averages(&careers);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].category, Category::Tech);
        assert_eq!(averages[0].avg_salary, 120_000);
        assert_eq!(averages[0].count, 2);
        assert_eq!(averages[1].category, Category::Healthcare);
        assert_eq!(averages[1].avg_salary, 40_000);
    }

    #[test]
    fn test_sweet_spot_requires_salary_and_openings() {
        let careers = vec![
            Career {
                current_openings: Some(5_000),
                growth_rate_numeric: Some(8.0),
                market_health_score: Some(72.0),
                ..career("swe", Some(Category::Tech), Some(130_000))
            },
            Career {
                current_openings: None,
                ..career("poet", Some(Category::Creative), Some(40_000))
            },
            Career {
                current_openings: Some(10),
                ..career("monk", Some(Category::Alternative), None)
            },
        ];
        let points = sweet_spot(&careers);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, "swe");
        assert_eq!(points[0].health_score, 72.0);
        assert_eq!(points[0].growth, 8.0);
    }
}
