//! Momentum indicators: MACD and KDJ.

use serde::{Deserialize, Serialize};
use stockstudy_core::traits::{BarIndicator, MultiOutputIndicator};
use stockstudy_core::types::{Bar, SeriesExt};

use crate::moving_average::StreamingEma;
use crate::policy;
use crate::simd::{max_simd, min_simd};

/// MACD (Moving Average Convergence Divergence) output for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// DIFF line (fast EMA - slow EMA)
    pub diff: f64,
    /// DEA signal line (EMA of DIFF), once the signal window is filled
    pub dea: Option<f64>,
    /// Histogram, 2 * (DIFF - DEA)
    pub macd: Option<f64>,
}

/// MACD indicator.
///
/// Both EMAs run the first-value-seeded recurrence from index 0. DIFF is exposed
/// once the slow window is filled (index `slow - 1`). DEA runs the same
/// recurrence over the exposed DIFF values, seeded with the first of them, and
/// is exposed `signal - 1` bars later.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(policy::MACD_FAST, policy::MACD_SLOW, policy::MACD_SIGNAL)
    }

    /// Create a MACD with custom periods.
    ///
    /// All periods must be positive and `fast < slow`. `signal` is independent
    /// of the other two; DEA appears `signal - 1` bars after the first DIFF.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }

    /// Index of the first DIFF value.
    pub fn diff_start(&self) -> usize {
        self.slow_period - 1
    }

    /// Index of the first DEA / histogram value.
    pub fn dea_start(&self) -> usize {
        self.diff_start() + self.signal_period - 1
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<Option<MacdOutput>> {
        let mut fast = StreamingEma::new(self.fast_period);
        let mut slow = StreamingEma::new(self.slow_period);
        let mut signal = StreamingEma::new(self.signal_period);

        let diff_start = self.diff_start();
        let dea_start = self.dea_start();

        data.iter()
            .enumerate()
            .map(|(i, &close)| {
                let fast_ema = fast.update(close);
                let slow_ema = slow.update(close);
                if i < diff_start {
                    return None;
                }

                let diff = fast_ema - slow_ema;
                let dea = signal.update(diff);
                let dea = (i >= dea_start).then_some(dea);

                Some(MacdOutput {
                    diff,
                    dea,
                    macd: dea.map(|dea| policy::MACD_HISTOGRAM_SCALE * (diff - dea)),
                })
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.slow_period
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// How the K/D recurrence starts at the first full window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KdjSeed {
    /// `k = d = rsv` at the first computable index.
    FirstRsv,
    /// Previous K and D assumed to be 50, recurrence applied at the first index.
    Neutral,
}

/// KDJ output for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KdjOutput {
    /// Raw stochastic value of the window
    pub rsv: f64,
    /// RSV smoothed with the 2/3 - 1/3 recurrence
    pub k: f64,
    /// K smoothed with the same recurrence
    pub d: f64,
    /// `3k - 2d`, unclamped
    pub j: f64,
}

/// KDJ stochastic oscillator.
///
/// `rsv` places the close within the window's low..high range (50 when the range
/// is empty), K smooths RSV, D smooths K, and `j = 3k - 2d`. Values are not
/// clamped to 0..100.
#[derive(Debug, Clone)]
pub struct Kdj {
    period: usize,
    seed: KdjSeed,
}

impl Kdj {
    /// Create a KDJ with the engine policy (period 9, first-RSV seeding).
    pub fn new() -> Self {
        Self::with_seed(policy::KDJ_PERIOD, policy::KDJ_SEED)
    }

    /// Create a KDJ with a custom period and seeding convention.
    pub fn with_seed(period: usize, seed: KdjSeed) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period, seed }
    }

    /// Seeding convention in use.
    pub fn seed(&self) -> KdjSeed {
        self.seed
    }

    /// Raw stochastic value of `close` within `[low, high]`.
    pub fn rsv(close: f64, low: f64, high: f64) -> f64 {
        let range = high - low;
        if range == 0.0 {
            policy::DEGENERATE_RSV
        } else {
            (close - low) / range * 100.0
        }
    }

    fn smooth(prev: f64, input: f64) -> f64 {
        policy::KDJ_PREV_WEIGHT * prev + policy::KDJ_RSV_WEIGHT * input
    }
}

impl Default for Kdj {
    fn default() -> Self {
        Self::new()
    }
}

impl BarIndicator for Kdj {
    type Output = KdjOutput;

    fn calculate(&self, bars: &[Bar]) -> Vec<Option<KdjOutput>> {
        let mut result = vec![None; bars.len()];
        if bars.len() < self.period {
            return result;
        }

        let highs = bars.highs();
        let lows = bars.lows();
        let mut prev: Option<(f64, f64)> = None;

        for i in (self.period - 1)..bars.len() {
            let start = i + 1 - self.period;
            let (Some(low), Some(high)) = (min_simd(&lows[start..=i]), max_simd(&highs[start..=i]))
            else {
                continue;
            };
            let rsv = Self::rsv(bars[i].close, low, high);

            let (k, d) = match (prev, self.seed) {
                (Some((prev_k, prev_d)), _) => {
                    let k = Self::smooth(prev_k, rsv);
                    (k, Self::smooth(prev_d, k))
                }
                (None, KdjSeed::FirstRsv) => (rsv, rsv),
                (None, KdjSeed::Neutral) => {
                    let k = Self::smooth(policy::KDJ_NEUTRAL_SEED, rsv);
                    (k, Self::smooth(policy::KDJ_NEUTRAL_SEED, k))
                }
            };
            prev = Some((k, d));

            result[i] = Some(KdjOutput {
                rsv,
                k,
                d,
                j: 3.0 * k - 2.0 * d,
            });
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "KDJ"
    }
}
