//! Shared application state.

use chrono::{Duration as DateDuration, NaiveDate};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use stockstudy_config::{AppConfig, DataSourceKind, RequestSettings};
use stockstudy_core::error::StudyError;
use stockstudy_core::traits::DataSource;
use stockstudy_data::{CsvDataSource, MockDataSource, StockCatalog, TimedCache};
use stockstudy_indicators::IndicatorEngine;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::models::{StockQuery, StockResponse, StudyRequest};

/// Longest accepted symbol.
pub const MAX_SYMBOL_LEN: usize = 12;

/// Everything a request handler needs.
pub struct AppState {
    source: Arc<dyn DataSource>,
    engine: IndicatorEngine,
    catalog: StockCatalog,
    limits: RequestSettings,
    cache: Option<Mutex<TimedCache<StockResponse>>>,
}

impl AppState {
    /// Create state without a response cache.
    pub fn new(source: Arc<dyn DataSource>, catalog: StockCatalog, limits: RequestSettings) -> Self {
        Self {
            source,
            engine: IndicatorEngine::new(),
            catalog,
            limits,
            cache: None,
        }
    }

    /// Enable response caching.
    pub fn with_cache(mut self, ttl: Duration) -> Self {
        self.cache = Some(Mutex::new(TimedCache::new(ttl)));
        self
    }

    /// Build state from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, StudyError> {
        let source: Arc<dyn DataSource> = match config.data.source {
            DataSourceKind::Mock => Arc::new(match config.data.seed {
                Some(seed) => MockDataSource::with_seed(seed),
                None => MockDataSource::new(),
            }),
            DataSourceKind::Csv => {
                let dir = config.data.csv_dir.as_ref().ok_or_else(|| {
                    StudyError::Config("data.csv_dir is required for the csv source".to_string())
                })?;
                Arc::new(CsvDataSource::new(dir)?)
            }
        };

        let catalog = StockCatalog::with_fallback(config.catalog.stocks.clone());

        let mut state = Self::new(source, catalog, config.request.clone());
        if config.cache.enabled {
            state = state.with_cache(Duration::from_secs(config.cache.ttl_secs));
        }

        info!(
            source = state.source.name(),
            stocks = state.catalog.len(),
            cache = config.cache.enabled,
            "Application state ready"
        );
        Ok(state)
    }

    pub fn catalog(&self) -> &StockCatalog {
        &self.catalog
    }

    pub fn limits(&self) -> &RequestSettings {
        &self.limits
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fill request defaults and check every field.
    pub fn resolve(&self, symbol: &str, query: StockQuery) -> Result<StudyRequest, ApiError> {
        let symbol = validate_symbol(symbol)?;
        let dividing_date = query.dividing_date.ok_or_else(|| {
            ApiError::BadRequest("dividing_date is required (YYYY-MM-DD)".to_string())
        })?;
        let historical_days = self.check_days(
            "historical_days",
            query.historical_days.unwrap_or(self.limits.default_historical_days),
        )?;
        let future_days = self.check_days(
            "future_days",
            query.future_days.unwrap_or(self.limits.default_future_days),
        )?;

        Ok(StudyRequest {
            symbol,
            dividing_date,
            historical_days,
            future_days,
        })
    }

    fn check_days(&self, field: &str, days: u32) -> Result<u32, ApiError> {
        if days == 0 || days > self.limits.max_days {
            return Err(ApiError::BadRequest(format!(
                "{} must be between 1 and {}, got {}",
                field, self.limits.max_days, days
            )));
        }
        Ok(days)
    }

    /// Fetch the window around the dividing date and enrich both sides.
    pub async fn study(&self, request: &StudyRequest) -> Result<StockResponse, ApiError> {
        let key = TimedCache::<StockResponse>::stock_key(
            &request.symbol,
            request.dividing_date,
            request.historical_days,
            request.future_days,
        );

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.lock().get(&key) {
                debug!(%key, "Cache hit");
                return Ok(hit);
            }
        }

        let (start, end) = date_window(request)?;
        let bars = self
            .source
            .daily_bars(&request.symbol, start, end)
            .await?;
        if bars.is_empty() {
            return Err(ApiError::NotFound(format!(
                "No data for {} between {} and {}",
                request.symbol, start, end
            )));
        }

        let split = self.engine.compute_split(&bars, request.dividing_date)?;
        debug!(
            symbol = %request.symbol,
            historical = split.historical.len(),
            future = split.future.len(),
            "Computed indicators"
        );

        let response = StockResponse {
            name: self.catalog.name_of(&request.symbol),
            symbol: request.symbol.clone(),
            dividing_date: request.dividing_date,
            historical_data: split.historical,
            future_data: split.future,
        };

        if let Some(cache) = &self.cache {
            cache.lock().put(key, response.clone());
        }

        Ok(response)
    }

    /// Drop expired cache entries.
    pub fn purge_cache(&self) -> usize {
        self.cache
            .as_ref()
            .map(|cache| cache.lock().purge_expired())
            .unwrap_or(0)
    }
}

fn validate_symbol(symbol: &str) -> Result<String, ApiError> {
    let symbol = symbol.trim();
    let valid = !symbol.is_empty()
        && symbol.len() <= MAX_SYMBOL_LEN
        && symbol.chars().all(|c| c.is_ascii_alphanumeric());
    if !valid {
        return Err(ApiError::BadRequest(format!(
            "symbol must be 1 to {} letters or digits, got {:?}",
            MAX_SYMBOL_LEN, symbol
        )));
    }
    Ok(symbol.to_string())
}

fn date_window(request: &StudyRequest) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let start = request
        .dividing_date
        .checked_sub_signed(DateDuration::days(i64::from(request.historical_days)));
    let end = request
        .dividing_date
        .checked_add_signed(DateDuration::days(i64::from(request.future_days)));
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(ApiError::BadRequest(
            "date window falls outside the supported calendar".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockstudy_core::error::DataError;
    use stockstudy_core::types::Bar;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mock_state() -> AppState {
        AppState::new(
            Arc::new(MockDataSource::with_seed(11)),
            StockCatalog::builtin(),
            RequestSettings::default(),
        )
    }

    struct UnorderedSource;

    #[async_trait::async_trait]
    impl DataSource for UnorderedSource {
        async fn daily_bars(
            &self,
            _symbol: &str,
            start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<Bar>, DataError> {
            let bar = Bar::new(start, 10.0, 11.0, 9.0, 10.5, 100.0);
            Ok(vec![bar, bar])
        }

        fn name(&self) -> &str {
            "unordered"
        }
    }

    #[test]
    fn test_from_config_errors() {
        let mut config = AppConfig::default();
        config.data.source = DataSourceKind::Csv;
        let missing_dir = AppState::from_config(&config);
        assert!(matches!(missing_dir, Err(StudyError::Config(_))));

        config.data.csv_dir = Some("/definitely/not/a/real/dir".into());
        let bad_dir = AppState::from_config(&config);
        assert!(matches!(bad_dir, Err(StudyError::Data(DataError::Io(_)))));
    }

    #[test]
    fn test_validate_symbol() {
        assert_eq!(validate_symbol(" 600519 ").unwrap(), "600519");
        assert!(validate_symbol("AAPL").is_ok());
        assert!(validate_symbol("").is_err());
        assert!(validate_symbol("60-0519").is_err());
        assert!(validate_symbol("ABCDEFGHIJKLM").is_err());
    }

    #[test]
    fn test_resolve_defaults_and_limits() {
        let state = mock_state();
        let query = StockQuery {
            dividing_date: Some(date(2024, 3, 1)),
            ..Default::default()
        };
        let request = state.resolve("600519", query).unwrap();
        assert_eq!(request.historical_days, 180);
        assert_eq!(request.future_days, 90);

        let missing_date = state.resolve("600519", StockQuery::default());
        assert!(matches!(missing_date, Err(ApiError::BadRequest(_))));

        let too_long = StockQuery {
            dividing_date: Some(date(2024, 3, 1)),
            historical_days: Some(3651),
            future_days: None,
        };
        assert!(matches!(state.resolve("600519", too_long), Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_study_splits_at_dividing_date() {
        let state = mock_state();
        let request = StudyRequest {
            symbol: "600519".to_string(),
            dividing_date: date(2024, 3, 1),
            historical_days: 180,
            future_days: 90,
        };

        let response = state.study(&request).await.unwrap();
        assert_eq!(response.name, "贵州茅台");
        assert!(!response.historical_data.is_empty());
        assert!(!response.future_data.is_empty());
        assert!(response
            .historical_data
            .iter()
            .all(|b| b.bar.date < request.dividing_date));
        assert!(response
            .future_data
            .iter()
            .all(|b| b.bar.date >= request.dividing_date));
        // The future side restarts its own warm-up
        assert!(response.future_data[0].indicators.k.is_none());
        assert!(response.future_data[0].indicators.ma5.is_none());
    }

    #[tokio::test]
    async fn test_study_uses_cache() {
        let state = mock_state().with_cache(Duration::from_secs(60));
        let request = StudyRequest {
            symbol: "000001".to_string(),
            dividing_date: date(2024, 6, 3),
            historical_days: 30,
            future_days: 30,
        };

        let first = state.study(&request).await.unwrap();
        let second = state.study(&request).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(state.purge_cache(), 0);
    }

    #[tokio::test]
    async fn test_weekend_window_is_not_found() {
        let state = mock_state();
        // Saturday and Sunday only
        let request = StudyRequest {
            symbol: "600519".to_string(),
            dividing_date: date(2024, 1, 7),
            historical_days: 1,
            future_days: 0,
        };
        let result = state.study(&request).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_malformed_series_is_unprocessable() {
        let state = AppState::new(
            Arc::new(UnorderedSource),
            StockCatalog::builtin(),
            RequestSettings::default(),
        );
        let request = StudyRequest {
            symbol: "600519".to_string(),
            dividing_date: date(2024, 3, 1),
            historical_days: 10,
            future_days: 10,
        };
        let result = state.study(&request).await;
        assert!(matches!(result, Err(ApiError::Unprocessable(_))));
    }
}
