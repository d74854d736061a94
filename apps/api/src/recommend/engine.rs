//! Rule-based career recommendations for a student profile.
//!
//! Scoring is additive and capped at 100:
//! category match 40, interest-text overlap up to 20, major match 25,
//! market-health bonus up to 10, trending 5.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::career::{Career, Category};
use crate::models::profile::UserProfile;

// ────────────────────────────────────────────────────────────────────────────
// Weights and tables
// ────────────────────────────────────────────────────────────────────────────

const CATEGORY_MATCH_POINTS: u32 = 40;
const INTEREST_OVERLAP_POINTS: u32 = 10;
const INTEREST_OVERLAP_CAP: u32 = 20;
const MAJOR_MATCH_POINTS: u32 = 25;
const TRENDING_POINTS: u32 = 5;
const MAX_SCORE: u32 = 100;

pub const DEFAULT_LIMIT: usize = 6;

pub const REASON_INTERESTS: &str = "Matches your interests";
pub const REASON_MAJOR: &str = "Fits your major";
pub const REASON_TRENDING: &str = "Trending";

/// Onboarding interest tags and the career categories each one points at.
pub const INTEREST_CATEGORIES: &[(&str, &[Category])] = &[
    ("technology", &[Category::Tech]),
    ("business", &[Category::Business]),
    ("healthcare", &[Category::Healthcare]),
    ("engineering", &[Category::Engineering]),
    ("science", &[Category::Science]),
    ("arts", &[Category::Creative]),
    ("education", &[Category::Education]),
    ("law", &[Category::Law]),
    ("social-impact", &[Category::Healthcare, Category::Education]),
    (
        "entrepreneurship",
        &[Category::Business, Category::Tech, Category::Alternative],
    ),
];

// ────────────────────────────────────────────────────────────────────────────
// Output model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCareer {
    pub career: Career,
    pub score: u32,
    pub match_reasons: Vec<&'static str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Match conditions
// ────────────────────────────────────────────────────────────────────────────

/// Union of the categories mapped from the profile's interest tags.
pub fn matched_categories(interests: &[String]) -> HashSet<Category> {
    interests
        .iter()
        .filter_map(|interest| {
            INTEREST_CATEGORIES
                .iter()
                .find(|(tag, _)| *tag == interest.as_str())
                .map(|(_, categories)| *categories)
        })
        .flatten()
        .copied()
        .collect()
}

fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Number of profile interests that substring-match (either direction,
/// case-insensitive) at least one of the career's interest tags.
pub fn interest_overlap(career: &Career, profile: &UserProfile) -> usize {
    let career_interests: Vec<String> = career.interests.iter().map(|i| i.to_lowercase()).collect();
    profile
        .interests
        .iter()
        .filter(|interest| {
            let interest = interest.to_lowercase();
            career_interests.iter().any(|ci| overlaps(ci, &interest))
        })
        .count()
}

pub fn category_matches(career: &Career, categories: &HashSet<Category>) -> bool {
    career
        .category
        .map(|c| categories.contains(&c))
        .unwrap_or(false)
}

pub fn major_matches(career: &Career, profile: &UserProfile) -> bool {
    if profile.major.is_empty() {
        return false;
    }
    let major = profile.major.to_lowercase();
    career
        .preferred_majors
        .iter()
        .any(|m| overlaps(&m.to_lowercase(), &major))
}

fn health_bonus(career: &Career) -> u32 {
    career
        .market_health_score
        .map(|score| (score.clamp(0.0, 100.0) / 10.0).round() as u32)
        .unwrap_or(0)
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring and ranking
// ────────────────────────────────────────────────────────────────────────────

fn score_with_categories(
    career: &Career,
    profile: &UserProfile,
    categories: &HashSet<Category>,
) -> u32 {
    let mut score = 0;

    if category_matches(career, categories) {
        score += CATEGORY_MATCH_POINTS;
    }

    let overlap = u32::try_from(interest_overlap(career, profile)).unwrap_or(u32::MAX);
    score += overlap
        .saturating_mul(INTEREST_OVERLAP_POINTS)
        .min(INTEREST_OVERLAP_CAP);

    if major_matches(career, profile) {
        score += MAJOR_MATCH_POINTS;
    }

    score += health_bonus(career);

    if career.is_trending {
        score += TRENDING_POINTS;
    }

    score.min(MAX_SCORE)
}

/// Relevance of one career to a profile, 0–100.
pub fn score_career(career: &Career, profile: &UserProfile) -> u32 {
    score_with_categories(career, profile, &matched_categories(&profile.interests))
}

/// Later-year students get fewer, stronger matches; earlier years explore broadly.
pub fn min_score_for_year(year: &str) -> u32 {
    match year {
        "Senior" | "Recent Grad" => 30,
        "Junior" => 20,
        _ => 10,
    }
}

pub fn match_reasons(
    career: &Career,
    profile: &UserProfile,
    categories: &HashSet<Category>,
) -> Vec<&'static str> {
    let mut reasons = Vec::new();
    if category_matches(career, categories) {
        reasons.push(REASON_INTERESTS);
    }
    if major_matches(career, profile) {
        reasons.push(REASON_MAJOR);
    }
    if career.is_trending {
        reasons.push(REASON_TRENDING);
    }
    reasons
}

/// Scores every career, drops those under the year threshold, and returns the
/// top `limit` by descending score. Equal scores keep their input order.
pub fn get_recommendations(
    careers: &[Career],
    profile: &UserProfile,
    limit: usize,
) -> Vec<ScoredCareer> {
    let categories = matched_categories(&profile.interests);
    let min_score = min_score_for_year(&profile.year);

    let mut scored: Vec<ScoredCareer> = careers
        .iter()
        .filter_map(|career| {
            let score = score_with_categories(career, profile, &categories);
            (score >= min_score).then(|| ScoredCareer {
                career: career.clone(),
                score,
                match_reasons: match_reasons(career, profile, &categories),
            })
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit.max(1));
    scored
}
