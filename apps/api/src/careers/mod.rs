// Career catalog: filtered listing, detail, salary percentiles, market trends,
// catalog insights and the data-quality report.

pub mod handlers;
pub mod query;
pub mod repository;
