//! Per-user cache of comparison analyses, keyed by the set of compared paths.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::comparison::ComparisonRow;

/// Canonical key for a set of paths: sorted and de-duplicated, so the same
/// selection in any order hits the same cache row.
pub fn paths_key(ids: &[String]) -> Vec<String> {
    let mut key: Vec<String> = ids.iter().map(|id| id.trim().to_string()).collect();
    key.sort();
    key.dedup();
    key
}

pub async fn find_cached(
    db: &PgPool,
    user_id: Uuid,
    key: &[String],
) -> Result<Option<ComparisonRow>, AppError> {
    let row = sqlx::query_as(
        "SELECT id, user_id, paths_compared, ai_analysis, created_at \
         FROM comparisons WHERE user_id = $1 AND paths_compared = $2",
    )
    .bind(user_id)
    .bind(key)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Inserts or refreshes the analysis for (user, key).
pub async fn store(
    db: &PgPool,
    user_id: Uuid,
    key: &[String],
    analysis: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO comparisons (user_id, paths_compared, ai_analysis)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, paths_compared)
        DO UPDATE SET ai_analysis = EXCLUDED.ai_analysis, created_at = now()
        "#,
    )
    .bind(user_id)
    .bind(key)
    .bind(analysis)
    .execute(db)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_key_is_order_independent() {
        assert_eq!(
            paths_key(&ids(&["nurse", "lawyer", "data-scientist"])),
            paths_key(&ids(&["data-scientist", "nurse", "lawyer"]))
        );
    }

    #[test]
    fn test_key_drops_duplicates() {
        assert_eq!(
            paths_key(&ids(&["nurse", "lawyer", "nurse "])),
            ids(&["lawyer", "nurse"])
        );
    }
}
