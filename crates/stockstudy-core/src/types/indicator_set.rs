//! Per-bar indicator values attached by the engine.

use serde::{Deserialize, Serialize};

use super::Bar;

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Indicator values for one bar.
///
/// A field is `None` until its indicator has enough history within the series.
/// Cross flags are only serialized on the bar where the cross happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub j: Option<f64>,

    /// MACD line (fast EMA - slow EMA)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<f64>,
    /// Signal line (EMA of DIFF)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dea: Option<f64>,
    /// Histogram, 2 * (DIFF - DEA)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma5: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma10: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma20: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma60: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mavol5: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mavol10: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mavol100: Option<f64>,

    /// K crossed above D on this bar
    #[serde(default, skip_serializing_if = "is_false")]
    pub golden_cross: bool,
    /// K crossed below D on this bar
    #[serde(default, skip_serializing_if = "is_false")]
    pub death_cross: bool,
    /// DIFF crossed up through zero on this bar
    #[serde(default, skip_serializing_if = "is_false")]
    pub zero_cross_up: bool,
    /// DIFF crossed down through zero on this bar
    #[serde(default, skip_serializing_if = "is_false")]
    pub zero_cross_down: bool,
}

impl IndicatorSet {
    /// Price moving average for the given period, if that period is tracked.
    pub fn price_ma(&self, period: usize) -> Option<f64> {
        match period {
            5 => self.ma5,
            10 => self.ma10,
            20 => self.ma20,
            60 => self.ma60,
            _ => None,
        }
    }

    /// Store a price moving average. Returns false for an untracked period.
    pub fn set_price_ma(&mut self, period: usize, value: f64) -> bool {
        let slot = match period {
            5 => &mut self.ma5,
            10 => &mut self.ma10,
            20 => &mut self.ma20,
            60 => &mut self.ma60,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Volume moving average for the given period, if that period is tracked.
    pub fn volume_ma(&self, period: usize) -> Option<f64> {
        match period {
            5 => self.mavol5,
            10 => self.mavol10,
            100 => self.mavol100,
            _ => None,
        }
    }

    /// Store a volume moving average. Returns false for an untracked period.
    pub fn set_volume_ma(&mut self, period: usize, value: f64) -> bool {
        let slot = match period {
            5 => &mut self.mavol5,
            10 => &mut self.mavol10,
            100 => &mut self.mavol100,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// True when no indicator value or flag is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A bar together with its indicator values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBar {
    #[serde(flatten)]
    pub bar: Bar,
    #[serde(flatten)]
    pub indicators: IndicatorSet,
}

impl EnrichedBar {
    /// Wrap a bar with no indicator values yet.
    pub fn new(bar: Bar) -> Self {
        Self {
            bar,
            indicators: IndicatorSet::default(),
        }
    }
}

/// A series partitioned at a dividing date, each side enriched on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitSeries {
    /// Bars dated before the dividing date
    pub historical: Vec<EnrichedBar>,
    /// Bars dated on or after the dividing date
    pub future: Vec<EnrichedBar>,
}

impl SplitSeries {
    /// Total number of bars across both partitions.
    pub fn len(&self) -> usize {
        self.historical.len() + self.future.len()
    }

    /// Check if both partitions are empty.
    pub fn is_empty(&self) -> bool {
        self.historical.is_empty() && self.future.is_empty()
    }
}
