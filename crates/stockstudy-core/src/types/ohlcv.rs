//! OHLCV (Open, High, Low, Close, Volume) daily bars.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;

/// One trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading date (no time-of-day semantics)
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check the per-bar invariants: finite positive prices,
    /// `low <= min(open, close) <= max(open, close) <= high`, non-negative volume.
    pub fn validate(&self) -> Result<(), &'static str> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err("price is not a finite number");
        }
        if prices.iter().any(|&p| p <= 0.0) {
            return Err("price must be positive");
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err("volume must be a non-negative finite number");
        }
        if self.low > self.open.min(self.close) || self.high < self.open.max(self.close) {
            return Err("open/close outside the low..high range");
        }
        Ok(())
    }
}

/// Column extraction over a slice of bars.
pub trait SeriesExt {
    /// Extract close prices.
    fn closes(&self) -> Vec<f64>;
    /// Extract high prices.
    fn highs(&self) -> Vec<f64>;
    /// Extract low prices.
    fn lows(&self) -> Vec<f64>;
    /// Extract volumes.
    fn volumes(&self) -> Vec<f64>;
}

impl SeriesExt for [Bar] {
    fn closes(&self) -> Vec<f64> {
        self.iter().map(|b| b.close).collect()
    }

    fn highs(&self) -> Vec<f64> {
        self.iter().map(|b| b.high).collect()
    }

    fn lows(&self) -> Vec<f64> {
        self.iter().map(|b| b.low).collect()
    }

    fn volumes(&self) -> Vec<f64> {
        self.iter().map(|b| b.volume).collect()
    }
}

/// Reject a series with invalid bars or dates that are not strictly increasing.
///
/// Fails on the first offending index; nothing is re-sorted or de-duplicated.
pub fn validate_series(bars: &[Bar]) -> Result<(), IndicatorError> {
    for (index, bar) in bars.iter().enumerate() {
        bar.validate().map_err(|reason| IndicatorError::InvalidBar {
            index,
            date: bar.date,
            reason: reason.to_string(),
        })?;

        if index > 0 {
            let previous = bars[index - 1].date;
            if bar.date <= previous {
                return Err(IndicatorError::UnorderedSeries {
                    index,
                    previous,
                    current: bar.date,
                });
            }
        }
    }
    Ok(())
}

/// Partition an ordered series at the dividing date.
///
/// Returns `(historical, future)` where historical holds every bar dated before
/// `dividing_date` and future holds the rest. Assumes the series is ordered.
pub fn split_at_date(bars: &[Bar], dividing_date: NaiveDate) -> (&[Bar], &[Bar]) {
    let idx = bars.partition_point(|b| b.date < dividing_date);
    bars.split_at(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn bar(d: u32, close: f64) -> Bar {
        Bar::new(day(d), close, close + 1.0, close - 1.0, close, 1000.0)
    }

    #[test]
    fn test_bar_validation_accepts_envelope() {
        let bar = Bar::new(day(2), 100.0, 110.0, 95.0, 105.0, 1000000.0);
        assert!(bar.validate().is_ok());

        // Touching the envelope is allowed
        let flat = Bar::new(day(2), 10.0, 10.0, 10.0, 10.0, 0.0);
        assert!(flat.validate().is_ok());
    }

    #[test]
    fn test_bar_validation_rejects_bad_values() {
        let mut not_finite = bar(2, 10.0);
        not_finite.close = f64::NAN;
        assert!(not_finite.validate().is_err());

        let inverted = Bar::new(day(2), 10.0, 9.0, 11.0, 10.0, 100.0);
        assert!(inverted.validate().is_err());

        let negative_volume = Bar::new(day(2), 10.0, 11.0, 9.0, 10.0, -1.0);
        assert!(negative_volume.validate().is_err());

        let zero_price = Bar::new(day(2), 0.0, 0.0, 0.0, 0.0, 1.0);
        assert!(zero_price.validate().is_err());
    }

    #[test]
    fn test_validate_series_ordering() {
        let ordered = vec![bar(2, 10.0), bar(3, 11.0), bar(4, 12.0)];
        assert!(validate_series(&ordered).is_ok());

        let duplicate = vec![bar(2, 10.0), bar(2, 11.0)];
        assert_eq!(
            validate_series(&duplicate),
            Err(IndicatorError::UnorderedSeries {
                index: 1,
                previous: day(2),
                current: day(2),
            })
        );

        let reversed = vec![bar(3, 10.0), bar(2, 11.0)];
        assert!(matches!(
            validate_series(&reversed),
            Err(IndicatorError::UnorderedSeries { index: 1, .. })
        ));
    }

    #[test]
    fn test_split_at_date() {
        let bars: Vec<Bar> = (2..=11).map(|d| bar(d, d as f64)).collect();

        let (historical, future) = split_at_date(&bars, day(6));
        assert_eq!(historical.len(), 4);
        assert_eq!(future.len(), 6);
        assert!(historical.iter().all(|b| b.date < day(6)));
        assert!(future.iter().all(|b| b.date >= day(6)));
        assert_eq!(future[0].date, day(6));

        // Dividing date on a non-trading day still partitions cleanly
        let (historical, future) = split_at_date(&bars, day(20));
        assert_eq!(historical.len(), 10);
        assert!(future.is_empty());

        let (historical, future) = split_at_date(&bars, day(1));
        assert!(historical.is_empty());
        assert_eq!(future.len(), 10);
    }

    #[test]
    fn test_series_extractions() {
        let bars = vec![bar(2, 100.5), bar(3, 101.5)];
        assert_eq!(bars.closes(), vec![100.5, 101.5]);
        assert_eq!(bars.highs(), vec![101.5, 102.5]);
        assert_eq!(bars.lows(), vec![99.5, 100.5]);
        assert_eq!(bars.volumes(), vec![1000.0, 1000.0]);
    }
}
