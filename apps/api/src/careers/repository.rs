use sqlx::PgPool;
use tracing::debug;

use crate::analytics::health::annotate_health;
use crate::careers::query::{build_career_query, CareerFilters, CareerSort};
use crate::errors::AppError;
use crate::models::career::{Career, CareerRow, CAREER_COLUMNS};
use crate::models::trend::MarketTrendRow;

fn into_careers(rows: Vec<CareerRow>) -> Vec<Career> {
    rows.into_iter()
        .map(|row| {
            let mut career = Career::from(row);
            annotate_health(&mut career);
            career
        })
        .collect()
}

/// Stable in-memory ordering by market health, highest first.
pub fn sort_by_health(careers: &mut [Career]) {
    careers.sort_by(|a, b| {
        let a = a.market_health_score.unwrap_or(0.0);
        let b = b.market_health_score.unwrap_or(0.0);
        b.total_cmp(&a)
    });
}

/// Filtered, health-annotated catalog listing.
pub async fn fetch_careers(db: &PgPool, filters: &CareerFilters) -> Result<Vec<Career>, AppError> {
    let mut qb = build_career_query(filters);
    let rows: Vec<CareerRow> = qb.build_query_as().fetch_all(db).await?;
    debug!(count = rows.len(), sort = ?filters.sort, "Fetched careers");

    let mut careers = into_careers(rows);
    if filters.sort == CareerSort::HealthDesc {
        sort_by_health(&mut careers);
    }
    Ok(careers)
}

pub async fn fetch_all_careers(db: &PgPool) -> Result<Vec<Career>, AppError> {
    fetch_careers(db, &CareerFilters::default()).await
}

pub async fn fetch_career(db: &PgPool, id: &str) -> Result<Option<Career>, AppError> {
    let row: Option<CareerRow> =
        sqlx::query_as(&format!("SELECT {CAREER_COLUMNS} FROM careers WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?;

    Ok(row.map(|row| {
        let mut career = Career::from(row);
        annotate_health(&mut career);
        career
    }))
}

pub async fn fetch_careers_by_ids(db: &PgPool, ids: &[String]) -> Result<Vec<Career>, AppError> {
    let rows: Vec<CareerRow> = sqlx::query_as(&format!(
        "SELECT {CAREER_COLUMNS} FROM careers WHERE id = ANY($1) ORDER BY id"
    ))
    .bind(ids)
    .fetch_all(db)
    .await?;
    Ok(into_careers(rows))
}

pub async fn fetch_market_trends(
    db: &PgPool,
    career_id: &str,
) -> Result<Vec<MarketTrendRow>, AppError> {
    let trends = sqlx::query_as(
        "SELECT career_id, date, average_salary, employment_count, source \
         FROM market_trends WHERE career_id = $1 ORDER BY date ASC",
    )
    .bind(career_id)
    .fetch_all(db)
    .await?;
    Ok(trends)
}
