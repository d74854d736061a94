//! Data-quality checks over the career catalog. Findings are advisory: they
//! are reported, never used to reject or hide a record.

use serde::Serialize;

use crate::models::career::Career;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    OutOfRange,
    EntryAboveMedian,
    TrajectoryNotIncreasing,
    KnownRangeMismatch,
    MissingField,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DataWarning {
    pub career_id: String,
    pub field: Option<&'static str>,
    pub kind: WarningKind,
    pub message: String,
}

type Getter = fn(&Career) -> Option<f64>;

/// Plausible bounds per numeric field.
const FIELD_RANGES: &[(&str, Getter, f64, f64)] = &[
    ("salary_entry", |c| c.salary_entry.map(f64::from), 20_000.0, 300_000.0),
    ("salary_year3", |c| c.salary_year3.map(f64::from), 25_000.0, 400_000.0),
    ("salary_year5", |c| c.salary_year5.map(f64::from), 30_000.0, 500_000.0),
    ("salary_year10", |c| c.salary_year10.map(f64::from), 35_000.0, 700_000.0),
    ("salary_median", |c| c.salary_median.map(f64::from), 30_000.0, 500_000.0),
    ("salary_p25", |c| c.salary_p25.map(f64::from), 20_000.0, 400_000.0),
    ("salary_p75", |c| c.salary_p75.map(f64::from), 40_000.0, 600_000.0),
    ("salary_p90", |c| c.salary_p90.map(f64::from), 50_000.0, 800_000.0),
    ("growth_rate_numeric", |c| c.growth_rate_numeric, -20.0, 100.0),
    ("employment_total", |c| c.employment_total.map(f64::from), 100.0, 10_000_000.0),
    ("current_openings", |c| c.current_openings.map(f64::from), 50.0, 5_000_000.0),
    ("annual_openings", |c| c.annual_openings.map(f64::from), 50.0, 2_000_000.0),
];

/// Expected median salary band for well-known careers.
const KNOWN_MEDIAN_RANGES: &[(&str, i32, i32)] = &[
    ("software-engineer", 90_000, 200_000),
    ("registered-nurse", 60_000, 120_000),
    ("physician", 180_000, 350_000),
    ("high-school-teacher", 45_000, 90_000),
    ("lawyer", 90_000, 200_000),
    ("data-scientist", 85_000, 180_000),
    ("accountant", 55_000, 110_000),
    ("pharmacist", 110_000, 160_000),
    ("mechanical-engineer", 70_000, 130_000),
    ("graphic-designer", 40_000, 85_000),
];

pub fn validate_careers(careers: &[Career]) -> Vec<DataWarning> {
    careers.iter().flat_map(validate_career).collect()
}

pub fn validate_career(career: &Career) -> Vec<DataWarning> {
    let id = career.id.as_str();
    let mut warnings = Vec::new();

    for (field, get, lo, hi) in FIELD_RANGES {
        if let Some(value) = get(career) {
            if value < *lo || value > *hi {
                warnings.push(DataWarning {
                    career_id: id.to_string(),
                    field: Some(*field),
                    kind: WarningKind::OutOfRange,
                    message: format!("{id}.{field} = {value} (expected {lo}–{hi})"),
                });
            }
        }
    }

    if let (Some(entry), Some(median)) = (career.salary_entry, career.salary_median) {
        if entry > 0 && median > 0 && f64::from(entry) > f64::from(median) * 1.1 {
            warnings.push(DataWarning {
                career_id: id.to_string(),
                field: Some("salary_entry"),
                kind: WarningKind::EntryAboveMedian,
                message: format!("{id}: salary_entry ({entry}) > salary_median ({median})"),
            });
        }
    }

    let trajectory: Vec<i32> = [
        career.salary_entry,
        career.salary_year3,
        career.salary_year5,
        career.salary_year10,
    ]
    .into_iter()
    .flatten()
    .collect();
    if let Some(pair) = trajectory.windows(2).find(|w| w[1] < w[0]) {
        warnings.push(DataWarning {
            career_id: id.to_string(),
            field: None,
            kind: WarningKind::TrajectoryNotIncreasing,
            message: format!(
                "{id}: salary trajectory not increasing ({} → {})",
                pair[0], pair[1]
            ),
        });
    }

    if let Some(median) = career.salary_median.filter(|m| *m > 0) {
        if let Some((_, lo, hi)) = KNOWN_MEDIAN_RANGES.iter().find(|(known, _, _)| *known == id) {
            if median < *lo || median > *hi {
                warnings.push(DataWarning {
                    career_id: id.to_string(),
                    field: Some("salary_median"),
                    kind: WarningKind::KnownRangeMismatch,
                    message: format!(
                        "{id}: salary_median ({median}) outside expected range ({lo}–{hi})"
                    ),
                });
            }
        }
    }

    let missing = [
        ("title", career.title.is_empty()),
        ("path_type", career.path_type.is_none()),
        ("category", career.category.is_none()),
    ];
    for (field, is_missing) in missing {
        if is_missing {
            warnings.push(DataWarning {
                career_id: id.to_string(),
                field: Some(field),
                kind: WarningKind::MissingField,
                message: format!("{id}: missing required field '{field}'"),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::career::{Category, PathType};

    fn clean(id: &str) -> Career {
        Career {
            id: id.to_string(),
            title: "Software Engineer".to_string(),
            path_type: Some(PathType::IndustryJob),
            category: Some(Category::Tech),
            salary_entry: Some(95_000),
            salary_year3: Some(120_000),
            salary_year5: Some(140_000),
            salary_year10: Some(180_000),
            salary_median: Some(130_000),
            current_openings: Some(150_000),
            growth_rate_numeric: Some(17.0),
            ..Default::default()
        }
    }

    fn kinds(warnings: &[DataWarning]) -> Vec<WarningKind> {
        warnings.iter().map(|w| w.kind).collect()
    }

    #[test]
    fn test_clean_record_has_no_warnings() {
        assert!(validate_career(&clean("software-engineer")).is_empty());
    }

    #[test]
    fn test_out_of_range_field_is_reported() {
        let career = Career {
            growth_rate_numeric: Some(250.0),
            ..clean("x")
        };
        let warnings = validate_career(&career);
        assert_eq!(kinds(&warnings), vec![WarningKind::OutOfRange]);
        assert_eq!(warnings[0].field, Some("growth_rate_numeric"));
    }

    #[test]
    fn test_entry_above_median() {
        let career = Career {
            salary_entry: Some(150_000),
            salary_year3: Some(160_000),
            ..clean("x")
        };
        assert!(kinds(&validate_career(&career)).contains(&WarningKind::EntryAboveMedian));
    }

    #[test]
    fn test_only_first_trajectory_drop_is_reported() {
        let career = Career {
            salary_year3: Some(90_000),
            salary_year5: Some(80_000),
            salary_year10: Some(70_000),
            ..clean("x")
        };
        let warnings = validate_career(&career);
        let drops: Vec<_> = warnings
            .iter()
            .filter(|w| w.kind == WarningKind::TrajectoryNotIncreasing)
            .collect();
        assert_eq!(drops.len(), 1);
        assert!(drops[0].message.contains("95000 → 90000"));
    }

    #[test]
    fn test_trajectory_ignores_missing_years() {
        let career = Career {
            salary_year3: None,
            salary_year5: None,
            ..clean("x")
        };
        assert!(validate_career(&career).is_empty());
    }

    #[test]
    fn test_known_range_mismatch() {
        let career = Career {
            salary_median: Some(250_000),
            salary_year10: Some(300_000),
            ..clean("software-engineer")
        };
        assert_eq!(
            kinds(&validate_career(&career)),
            vec![WarningKind::KnownRangeMismatch]
        );
    }

    #[test]
    fn test_missing_required_fields() {
        let career = Career {
            id: "bare".to_string(),
            ..Default::default()
        };
        let warnings = validate_career(&career);
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().all(|w| w.kind == WarningKind::MissingField));
    }

    #[test]
    fn test_validate_careers_flattens() {
        let careers = vec![clean("a"), Career { id: "b".to_string(), ..Default::default() }];
        assert_eq!(validate_careers(&careers).len(), 3);
    }
}
