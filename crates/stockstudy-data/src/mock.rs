//! Deterministic random-walk data source.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stockstudy_core::error::DataError;
use stockstudy_core::traits::DataSource;
use stockstudy_core::types::Bar;
use tracing::debug;

use crate::check_range;

/// Synthetic daily bars for any symbol.
///
/// Each symbol gets its own price level and volatility derived from its
/// trailing digits. The generator is seeded per request, so the same
/// `(symbol, start, end)` always yields the same series.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    seed: Option<u64>,
}

impl MockDataSource {
    /// Create a source seeded from each symbol.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Create a source with a fixed seed shared by all symbols.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng_for(&self, symbol: &str) -> StdRng {
        StdRng::seed_from_u64(self.seed.unwrap_or_else(|| symbol_hash(symbol)))
    }

    /// Generate the walk without the async wrapper.
    pub fn generate(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
        let digits = symbol_digits(symbol);
        let base_price = 10.0 + (digits % 1000 % 100) as f64 / 10.0;
        let volatility = 0.02 + (digits % 100 % 10) as f64 / 1000.0;

        let mut rng = self.rng_for(symbol);
        let mut bars = Vec::new();
        let mut prev_close = base_price;

        for date in start.iter_days().take_while(|d| *d <= end) {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            let open = prev_close;
            let close = open + (rng.random::<f64>() - 0.5) * volatility * open;
            let high = open.max(close) * (1.0 + rng.random::<f64>() * 0.02);
            let low = open.min(close) * (1.0 - rng.random::<f64>() * 0.02);
            let volume = (1_000_000.0 + rng.random::<f64>() * 2_000_000.0).trunc();

            let bar = Bar::new(
                date,
                round2(open),
                round2(high),
                round2(low),
                round2(close),
                volume,
            );
            prev_close = bar.close;
            bars.push(bar);
        }

        debug!(symbol, bars = bars.len(), "Generated mock series");
        bars
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError> {
        check_range(start, end)?;
        Ok(self.generate(symbol, start, end))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// FNV-1a, stable across runs and platforms.
fn symbol_hash(symbol: &str) -> u64 {
    symbol.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Numeric value of the symbol's trailing digits, or a hash-derived stand-in.
fn symbol_digits(symbol: &str) -> u64 {
    let trailing: String = symbol
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .take(3)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    trailing
        .parse::<u64>()
        .unwrap_or_else(|_| symbol_hash(symbol) % 1000)
}
