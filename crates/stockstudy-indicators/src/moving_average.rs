//! Moving average indicators.

use stockstudy_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Plain trailing arithmetic mean of the last N values, no weighting.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result[self.period - 1] = Some(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result[i] = Some(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Seeded with the first value (`ema[0] = data[0]`), then
/// `ema[i] = (data[i] - ema[i-1]) * multiplier + ema[i-1]`. Every index carries
/// a value; callers that need a warm-up window gate on their own period.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Smoothing factor `2 / (period + 1)`.
    pub fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut ema = StreamingEma::new(self.period);
        data.iter().map(|&value| Some(ema.update(value))).collect()
    }

    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// Streaming EMA that maintains state for incremental updates.
///
/// Uses the same first-value seeding as [`Ema`].
#[derive(Debug, Clone)]
pub struct StreamingEma {
    multiplier: f64,
    current: Option<f64>,
}

impl StreamingEma {
    /// Create a new streaming EMA.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self {
            multiplier,
            current: None,
        }
    }

    /// Update with a new value and return the current EMA.
    pub fn update(&mut self, value: f64) -> f64 {
        let next = match self.current {
            Some(prev) => (value - prev) * self.multiplier + prev,
            None => value,
        };
        self.current = Some(next);
        next
    }
}
