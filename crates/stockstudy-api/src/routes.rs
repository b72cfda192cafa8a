//! REST endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use stockstudy_data::DEFAULT_SEARCH_LIMIT;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{HealthResponse, SearchQuery, SearchResponse, StockQuery};
use crate::state::AppState;

/// Upper bound on `limit` for search.
const MAX_SEARCH_LIMIT: usize = 100;

/// Build the REST router with CORS, request tracing and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/stock/search", get(search))
        .route("/api/stock/:symbol", get(stock))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(MAX_SEARCH_LIMIT);

    let stocks = state.catalog().search(&query.query, limit);
    debug!(query = %query.query, results = stocks.len(), "Stock search");
    Ok(Json(SearchResponse { stocks }))
}

async fn stock(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    query: Result<Query<StockQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = state.resolve(&symbol, query)?;
    let response = state.study(&request).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::Value;
    use stockstudy_config::RequestSettings;
    use stockstudy_core::error::DataError;
    use stockstudy_core::traits::DataSource;
    use stockstudy_core::types::Bar;
    use stockstudy_data::{MockDataSource, StockCatalog};
    use tower::ServiceExt;

    struct EmptySource;

    #[async_trait::async_trait]
    impl DataSource for EmptySource {
        async fn daily_bars(
            &self,
            _symbol: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<Bar>, DataError> {
            Ok(Vec::new())
        }

        fn name(&self) -> &str {
            "empty"
        }
    }

    fn app_with(source: Arc<dyn DataSource>) -> Router {
        let state = AppState::new(source, StockCatalog::builtin(), RequestSettings::default())
            .with_cache(std::time::Duration::from_secs(60));
        router(Arc::new(state))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        request_json(app_with(Arc::new(MockDataSource::with_seed(3))), uri).await
    }

    async fn request_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_search() {
        let (status, body) = get_json("/api/stock/search?query=600").await;
        assert_eq!(status, StatusCode::OK);
        let stocks = body["stocks"].as_array().unwrap();
        assert_eq!(stocks.len(), 2);
        assert!(stocks.iter().all(|s| s["symbol"].as_str().unwrap().contains("600")));

        let (_, body) = get_json("/api/stock/search").await;
        assert_eq!(body["stocks"].as_array().unwrap().len(), 13);
    }

    #[tokio::test]
    async fn test_stock_payload() {
        let (status, body) =
            get_json("/api/stock/600519?dividing_date=2024-03-01&historical_days=120&future_days=60")
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "600519");
        assert_eq!(body["name"], "贵州茅台");
        assert_eq!(body["dividing_date"], "2024-03-01");

        let historical = body["historical_data"].as_array().unwrap();
        let future = body["future_data"].as_array().unwrap();
        assert!(!historical.is_empty() && !future.is_empty());

        // Flattened bar plus camelCase indicators
        let last = historical.last().unwrap();
        for field in ["date", "open", "high", "low", "close", "volume", "k", "d", "j", "ma5", "ma20", "mavol5"] {
            assert!(last.get(field).is_some(), "missing {}", field);
        }
        // Warm-up values are omitted, not null
        assert!(historical[0].get("k").is_none());
        assert!(future[0].get("ma5").is_none());
    }

    #[tokio::test]
    async fn test_stock_bad_requests() {
        for uri in [
            "/api/stock/600519",
            "/api/stock/600519?dividing_date=2024-13-45",
            "/api/stock/600519?dividing_date=2024-03-01&historical_days=0",
            "/api/stock/600519?dividing_date=2024-03-01&future_days=-5",
            "/api/stock/600519?dividing_date=2024-03-01&future_days=99999",
            "/api/stock/ABCDEFGHIJKLMN?dividing_date=2024-03-01",
        ] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert!(body["error"].is_string(), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_stock_no_data() {
        let (status, body) = request_json(
            app_with(Arc::new(EmptySource)),
            "/api/stock/600519?dividing_date=2024-03-01",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }
}
