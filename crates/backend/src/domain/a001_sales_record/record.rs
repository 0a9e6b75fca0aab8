use chrono::NaiveDate;
use contracts::dashboards::d400_sales_explorer::Classification;
use serde::Serialize;

/// One normalized row of the sales table.
///
/// Built once at ingestion and never mutated afterwards; `classification`
/// is derived from `organic_claim` at that point only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub period: NaiveDate,
    pub segment: String,
    pub sub_category: String,
    pub organic_claim: Option<String>,
    pub classification: Classification,
    pub dollars: f64,
    pub dollars_ya: f64,
    pub units: f64,
    pub units_ya: f64,
    pub pounds: f64,
    pub pounds_ya: f64,
}
