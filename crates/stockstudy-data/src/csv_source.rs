//! CSV data source.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use stockstudy_core::error::DataError;
use stockstudy_core::traits::DataSource;
use stockstudy_core::types::Bar;
use tracing::{debug, warn};

use crate::check_range;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp", alias = "trade_date")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", alias = "vol", default)]
    volume: f64,
}

/// Daily bars read from `<dir>/<symbol>.csv` files.
pub struct CsvDataSource {
    dir: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source over a directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, DataError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(DataError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("CSV directory not found: {}", dir.display()),
            )));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Find the file holding `symbol`, trying the usual naming variants.
    fn locate(&self, symbol: &str) -> Option<PathBuf> {
        let variants = [symbol.to_string(), symbol.to_lowercase(), symbol.to_uppercase()];
        variants
            .iter()
            .flat_map(|s| [format!("{}.csv", s), format!("{}_daily.csv", s)])
            .map(|name| self.dir.join(name))
            .find(|path| path.is_file())
    }

    /// Load every bar from a file, sorted by date with duplicate dates dropped.
    fn load_from_path(&self, path: &Path) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut bars = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            let date = parse_date(&record.date)?;

            bars.push(Bar::new(
                date,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }

        // Sort by date
        bars.sort_by_key(|b| b.date);
        let before = bars.len();
        bars.dedup_by_key(|b| b.date);
        if bars.len() != before {
            warn!(
                path = %path.display(),
                dropped = before - bars.len(),
                "Dropped rows with duplicate dates"
            );
        }

        Ok(bars)
    }
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError> {
        check_range(start, end)?;

        let path = self
            .locate(symbol)
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;

        let mut bars = self.load_from_path(&path)?;
        bars.retain(|b| b.date >= start && b.date <= end);

        debug!(symbol, path = %path.display(), bars = bars.len(), "Loaded CSV bars");
        Ok(bars)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse the date formats seen in exported daily data.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.date());
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stockstudy-csv-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-15").unwrap(), date(2024, 1, 15));
        assert_eq!(parse_date("2024/01/15").unwrap(), date(2024, 1, 15));
        assert_eq!(parse_date("20240115").unwrap(), date(2024, 1, 15));
        assert_eq!(parse_date("2024-01-15 10:30:00").unwrap(), date(2024, 1, 15));
        assert!(parse_date("yesterday").is_err());
    }

    #[tokio::test]
    async fn test_load_sorted_and_filtered() {
        let dir = temp_dir("sorted");
        fs::write(
            dir.join("600519_daily.csv"),
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-04,10.5,11,10,10.8,1000\n\
             2024-01-02,10,10.6,9.8,10.2,1200\n\
             2024-01-03,10.2,10.7,10.1,10.5,900\n\
             2024-01-05,10.8,11.2,10.6,11,1500\n",
        )
        .unwrap();

        let source = CsvDataSource::new(&dir).unwrap();
        let bars = source
            .daily_bars("600519", date(2024, 1, 2), date(2024, 1, 4))
            .await
            .unwrap();

        let dates: Vec<_> = bars.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)]);
        assert!((bars[0].close - 10.2).abs() < 1e-10);

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_duplicate_dates_dropped() {
        let dir = temp_dir("dupes");
        fs::write(
            dir.join("AAPL.csv"),
            "date,open,high,low,close,volume\n\
             2024-01-02,10,11,9,10,1\n\
             2024-01-02,10,11,9,10,1\n\
             2024-01-03,10,11,9,10,1\n",
        )
        .unwrap();

        let source = CsvDataSource::new(&dir).unwrap();
        let bars = source
            .daily_bars("aapl", date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(bars.len(), 2);

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_missing_symbol() {
        let dir = temp_dir("missing");
        let source = CsvDataSource::new(&dir).unwrap();
        let result = source
            .daily_bars("000001", date(2024, 1, 1), date(2024, 1, 31))
            .await;
        assert!(matches!(result, Err(DataError::SymbolNotFound(_))));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_directory() {
        assert!(CsvDataSource::new("/definitely/not/a/real/dir").is_err());
    }
}
