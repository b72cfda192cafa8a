//! Fixed indicator policy.
//!
//! These are the only knobs the engine uses. They are not negotiated at
//! runtime; changing one changes every computed series.

use crate::momentum::KdjSeed;

/// KDJ look-back window (bars).
pub const KDJ_PERIOD: usize = 9;

/// Weight of the previous K (or D) in the KDJ recurrence.
pub const KDJ_PREV_WEIGHT: f64 = 2.0 / 3.0;

/// Weight of the new RSV (or K) in the KDJ recurrence.
pub const KDJ_RSV_WEIGHT: f64 = 1.0 / 3.0;

/// K/D value assumed before the first window under [`KdjSeed::Neutral`].
pub const KDJ_NEUTRAL_SEED: f64 = 50.0;

/// Seeding convention at the first computable KDJ index.
pub const KDJ_SEED: KdjSeed = KdjSeed::FirstRsv;

/// RSV used when the window high equals the window low.
pub const DEGENERATE_RSV: f64 = 50.0;

/// MACD fast EMA period.
pub const MACD_FAST: usize = 12;

/// MACD slow EMA period.
pub const MACD_SLOW: usize = 26;

/// MACD signal (DEA) EMA period.
pub const MACD_SIGNAL: usize = 9;

/// Histogram scale: `macd = MACD_HISTOGRAM_SCALE * (diff - dea)`.
pub const MACD_HISTOGRAM_SCALE: f64 = 2.0;

/// Simple moving averages of close.
pub const PRICE_MA_PERIODS: [usize; 4] = [5, 10, 20, 60];

/// Simple moving averages of volume.
pub const VOLUME_MA_PERIODS: [usize; 3] = [5, 10, 100];
