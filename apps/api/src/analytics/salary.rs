use serde::Serialize;

use crate::models::career::Career;

/// A known (percentile, salary) anchor.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SalaryMarker {
    pub percentile: f64,
    pub label: &'static str,
    pub value: f64,
}

/// The four published salary percentiles of a career.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalaryPercentiles {
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p75: Option<f64>,
    pub p90: Option<f64>,
}

impl SalaryPercentiles {
    pub fn from_career(career: &Career) -> Self {
        Self {
            p25: career.salary_p25.map(f64::from),
            median: career.salary_median.map(f64::from),
            p75: career.salary_p75.map(f64::from),
            p90: career.salary_p90.map(f64::from),
        }
    }

    /// Known anchors in ascending percentile order.
    pub fn markers(&self) -> Vec<SalaryMarker> {
        [
            (25.0, "P25", self.p25),
            (50.0, "P50", self.median),
            (75.0, "P75", self.p75),
            (90.0, "P90", self.p90),
        ]
        .into_iter()
        .filter_map(|(percentile, label, value)| {
            value.map(|value| SalaryMarker {
                percentile,
                label,
                value,
            })
        })
        .collect()
    }

    pub fn at(&self, percentile: f64) -> Option<i64> {
        interpolate_salary(percentile, self.p25, self.median, self.p75, self.p90)
    }
}

/// Estimates the salary at `percentile` by piecewise-linear interpolation over
/// the known anchors. Never extrapolates: requests outside the known range
/// return the nearest endpoint. Returns `None` when fewer than two anchors exist.
pub fn interpolate_salary(
    percentile: f64,
    p25: Option<f64>,
    median: Option<f64>,
    p75: Option<f64>,
    p90: Option<f64>,
) -> Option<i64> {
    let points: Vec<(f64, f64)> = [(25.0, p25), (50.0, median), (75.0, p75), (90.0, p90)]
        .into_iter()
        .filter_map(|(x, y)| y.map(|y| (x, y)))
        .collect();

    let (&(first_x, first_y), &(last_x, last_y)) = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 => (first, last),
        _ => return None,
    };

    if percentile <= first_x {
        return Some(first_y.round() as i64);
    }
    if percentile >= last_x {
        return Some(last_y.round() as i64);
    }

    points
        .windows(2)
        .find_map(|pair| match *pair {
            [(x0, y0), (x1, y1)] if x0 <= percentile && percentile <= x1 => {
                if x1 - x0 == 0.0 {
                    return Some(y0.round() as i64);
                }
                let t = (percentile - x0) / (x1 - x0);
                Some((y0 + t * (y1 - y0)).round() as i64)
            }
            _ => None,
        })
}
