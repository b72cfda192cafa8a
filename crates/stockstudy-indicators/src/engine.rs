//! Indicator engine: enriches an OHLCV series with every configured indicator.

use chrono::NaiveDate;
use stockstudy_core::error::IndicatorError;
use stockstudy_core::traits::{BarIndicator, Indicator, MultiOutputIndicator};
use stockstudy_core::types::{
    split_at_date, validate_series, Bar, EnrichedBar, SeriesExt, SplitSeries,
};
use tracing::debug;

use crate::momentum::{Kdj, KdjSeed, Macd};
use crate::moving_average::Sma;
use crate::policy;
use crate::signals::{detect_line_crosses, detect_zero_crosses, LineCross, ZeroCross};

/// Stateless indicator engine.
///
/// Holds only the indicator definitions, so one instance can be shared across
/// threads and requests.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    kdj: Kdj,
    macd: Macd,
    price_mas: Vec<Sma>,
    volume_mas: Vec<Sma>,
}

impl IndicatorEngine {
    /// Create an engine with the fixed policy in [`policy`].
    pub fn new() -> Self {
        Self {
            kdj: Kdj::new(),
            macd: Macd::new(),
            price_mas: policy::PRICE_MA_PERIODS.iter().map(|&p| Sma::new(p)).collect(),
            volume_mas: policy::VOLUME_MA_PERIODS.iter().map(|&p| Sma::new(p)).collect(),
        }
    }

    /// Replace the KDJ seeding convention.
    pub fn with_kdj_seed(mut self, seed: KdjSeed) -> Self {
        self.kdj = Kdj::with_seed(policy::KDJ_PERIOD, seed);
        self
    }

    /// KDJ seeding convention in use.
    pub fn kdj_seed(&self) -> KdjSeed {
        self.kdj.seed()
    }

    /// Enrich a whole series.
    ///
    /// The output has the same length and order as `bars`. Malformed input
    /// (invalid bar, unordered or duplicate dates) rejects the whole call.
    pub fn compute(&self, bars: &[Bar]) -> Result<Vec<EnrichedBar>, IndicatorError> {
        validate_series(bars)?;
        Ok(self.enrich(bars))
    }

    /// Partition at `dividing_date` and enrich each side on its own.
    ///
    /// The future side never sees historical bars, so its first bars carry no
    /// KDJ, MACD or moving-average values.
    pub fn compute_split(
        &self,
        bars: &[Bar],
        dividing_date: NaiveDate,
    ) -> Result<SplitSeries, IndicatorError> {
        validate_series(bars)?;
        let (historical, future) = split_at_date(bars, dividing_date);
        debug!(
            %dividing_date,
            historical = historical.len(),
            future = future.len(),
            "split series"
        );

        Ok(SplitSeries {
            historical: self.enrich(historical),
            future: self.enrich(future),
        })
    }

    fn enrich(&self, bars: &[Bar]) -> Vec<EnrichedBar> {
        let mut out: Vec<EnrichedBar> = bars.iter().copied().map(EnrichedBar::new).collect();
        if bars.is_empty() {
            return out;
        }

        let closes = bars.closes();
        let volumes = bars.volumes();

        for sma in &self.price_mas {
            for (row, value) in out.iter_mut().zip(sma.calculate(&closes)) {
                if let Some(value) = value {
                    row.indicators.set_price_ma(sma.period(), value);
                }
            }
        }

        for sma in &self.volume_mas {
            for (row, value) in out.iter_mut().zip(sma.calculate(&volumes)) {
                if let Some(value) = value {
                    row.indicators.set_volume_ma(sma.period(), value);
                }
            }
        }

        let kdj = self.kdj.calculate(bars);
        let kd_pairs: Vec<Option<(f64, f64)>> =
            kdj.iter().map(|o| o.map(|o| (o.k, o.d))).collect();
        let kd_crosses = detect_line_crosses(&kd_pairs);
        for ((row, value), cross) in out.iter_mut().zip(kdj).zip(kd_crosses) {
            if let Some(value) = value {
                row.indicators.k = Some(value.k);
                row.indicators.d = Some(value.d);
                row.indicators.j = Some(value.j);
            }
            match cross {
                Some(LineCross::Golden) => row.indicators.golden_cross = true,
                Some(LineCross::Death) => row.indicators.death_cross = true,
                None => {}
            }
        }

        let macd = self.macd.calculate(&closes);
        let diffs: Vec<Option<f64>> = macd.iter().map(|o| o.map(|o| o.diff)).collect();
        let zero_crosses = detect_zero_crosses(&diffs);
        for ((row, value), cross) in out.iter_mut().zip(macd).zip(zero_crosses) {
            if let Some(value) = value {
                row.indicators.diff = Some(value.diff);
                row.indicators.dea = value.dea;
                row.indicators.macd = value.macd;
            }
            match cross {
                Some(ZeroCross::Up) => row.indicators.zero_cross_up = true,
                Some(ZeroCross::Down) => row.indicators.zero_cross_down = true,
                None => {}
            }
        }

        debug!(bars = bars.len(), "computed indicators");
        out
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}
