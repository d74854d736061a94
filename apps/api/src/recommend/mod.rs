//! Recommendations: pluggable, trait-based ranking of careers for a profile.
//!
//! Default: `RuleBasedRecommender` (pure and deterministic).
//! `AppState` holds an `Arc<dyn Recommender>`, chosen at startup.

pub mod engine;
pub mod handlers;

use crate::models::career::Career;
use crate::models::profile::UserProfile;

pub use engine::ScoredCareer;

/// Implement this to swap ranking backends without touching handlers.
pub trait Recommender: Send + Sync {
    fn recommend(&self, careers: &[Career], profile: &UserProfile, limit: usize)
        -> Vec<ScoredCareer>;

    /// Label reported to clients for transparency.
    fn backend(&self) -> &'static str;
}

pub struct RuleBasedRecommender;

impl Recommender for RuleBasedRecommender {
    fn recommend(
        &self,
        careers: &[Career],
        profile: &UserProfile,
        limit: usize,
    ) -> Vec<ScoredCareer> {
        engine::get_recommendations(careers, profile, limit)
    }

    fn backend(&self) -> &'static str {
        "rules"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::career::Category;
    use std::sync::Arc;

    #[test]
    fn test_rule_based_backend_delegates_to_engine() {
        let recommender: Arc<dyn Recommender> = Arc::new(RuleBasedRecommender);
        let careers = vec![Career {
            id: "swe".to_string(),
            category: Some(Category::Tech),
            ..Default::default()
        }];
        let profile = UserProfile {
            interests: vec!["technology".to_string()],
            ..Default::default()
        };
        let results = recommender.recommend(&careers, &profile, 6);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 40);
        assert_eq!(recommender.backend(), "rules");
    }
}
