//! Market health: a 0–100 composite of four labor-market signals.
//!
//! Each signal is normalized on its own scale before weighting: growth and
//! salary trajectory linearly, openings logarithmically (they span orders of
//! magnitude), layoff risk as a lookup. Weights and domains are fixed so that
//! stored scores stay comparable across releases.

use serde::Serialize;

use crate::models::career::{Career, LayoffRisk};

const GROWTH_WEIGHT: f64 = 0.30;
const OPENINGS_WEIGHT: f64 = 0.25;
const TRAJECTORY_WEIGHT: f64 = 0.25;
const RISK_WEIGHT: f64 = 0.20;

/// Growth-rate domain in percent, mapped onto 0–100.
const GROWTH_MIN: f64 = -5.0;
const GROWTH_MAX: f64 = 30.0;
/// Openings at which the log scale saturates.
const OPENINGS_CEILING: f64 = 500_000.0;
/// Ten-year salary growth (percent) that earns a full trajectory score.
const TRAJECTORY_CEILING: f64 = 150.0;

/// Per-factor view of a health score, as shown on the career detail page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HealthBreakdown {
    pub score: u32,
    pub factors: Vec<HealthFactor>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HealthFactor {
    pub label: &'static str,
    pub weight: f64,
    /// Normalized sub-score, 0–100.
    pub score: f64,
}

fn clamp_100(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

pub fn growth_score(growth_rate: Option<f64>) -> f64 {
    let growth = growth_rate.unwrap_or(0.0);
    clamp_100((growth - GROWTH_MIN) / (GROWTH_MAX - GROWTH_MIN) * 100.0)
}

pub fn openings_score(openings: Option<i32>) -> f64 {
    match openings {
        Some(n) if n > 0 => clamp_100(f64::from(n).log10() / OPENINGS_CEILING.log10() * 100.0),
        _ => 0.0,
    }
}

/// Percent growth from entry to year-10 salary; median stands in for either end.
pub fn trajectory_growth_pct(career: &Career) -> f64 {
    let entry = f64::from(career.salary_entry.or(career.salary_median).unwrap_or(0));
    let year10 = f64::from(career.salary_year10.or(career.salary_median).unwrap_or(0));
    if entry > 0.0 {
        (year10 - entry) / entry * 100.0
    } else {
        0.0
    }
}

pub fn trajectory_score(career: &Career) -> f64 {
    clamp_100(trajectory_growth_pct(career) / TRAJECTORY_CEILING * 100.0)
}

pub fn risk_score(risk: Option<LayoffRisk>) -> f64 {
    match risk {
        Some(LayoffRisk::Low) => 100.0,
        Some(LayoffRisk::Medium) | None => 50.0,
        Some(LayoffRisk::High) => 0.0,
    }
}

pub fn health_breakdown(career: &Career) -> HealthBreakdown {
    let factors = vec![
        HealthFactor {
            label: "Growth Rate",
            weight: GROWTH_WEIGHT,
            score: growth_score(career.growth_rate_numeric),
        },
        HealthFactor {
            label: "Job Openings",
            weight: OPENINGS_WEIGHT,
            score: openings_score(career.current_openings),
        },
        HealthFactor {
            label: "Salary Growth",
            weight: TRAJECTORY_WEIGHT,
            score: trajectory_score(career),
        },
        HealthFactor {
            label: "Layoff Risk",
            weight: RISK_WEIGHT,
            score: risk_score(career.layoff_risk),
        },
    ];

    let weighted: f64 = factors.iter().map(|f| f.weight * f.score).sum();
    // Every factor is pre-clamped, so the weighted sum already lies in [0, 100].
    let score = weighted.round().clamp(0.0, 100.0) as u32;

    HealthBreakdown { score, factors }
}

/// Market health score in [0, 100]. Missing inputs contribute their neutral default.
pub fn compute_health_score(career: &Career) -> u32 {
    health_breakdown(career).score
}

/// Fills `market_health_score` when the stored row did not carry one.
pub fn annotate_health(career: &mut Career) {
    if career.market_health_score.is_none() {
        career.market_health_score = Some(f64::from(compute_health_score(career)));
    }
}
