//! Request and response bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockstudy_core::types::{EnrichedBar, StockInfo};

/// Query string of `GET /api/stock/:symbol`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockQuery {
    pub dividing_date: Option<NaiveDate>,
    pub historical_days: Option<u32>,
    pub future_days: Option<u32>,
}

/// Query string of `GET /api/stock/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    pub limit: Option<usize>,
}

/// A fully resolved study request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyRequest {
    pub symbol: String,
    pub dividing_date: NaiveDate,
    pub historical_days: u32,
    pub future_days: u32,
}

/// Historical and future bars around a dividing date, each side enriched
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockResponse {
    pub symbol: String,
    pub name: String,
    pub dividing_date: NaiveDate,
    pub historical_data: Vec<EnrichedBar>,
    pub future_data: Vec<EnrichedBar>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub stocks: Vec<StockInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
