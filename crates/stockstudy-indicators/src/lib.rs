//! Technical indicator engine.
//!
//! This crate turns an ordered OHLCV series into an enriched series carrying:
//! - Price and volume simple moving averages
//! - KDJ (stochastic K/D/J with 2/3 - 1/3 smoothing)
//! - MACD (DIFF, DEA and histogram from proper EMA recurrences)
//! - Golden/death cross and MACD zero-axis cross flags
//!
//! All computations are causal: a value at index `i` only sees bars `0..=i`.
//! [`IndicatorEngine::compute_split`] enriches the two sides of a dividing
//! date independently.

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod policy;
pub mod signals;
pub mod simd;

pub use engine::IndicatorEngine;
pub use momentum::{Kdj, KdjOutput, KdjSeed, Macd, MacdOutput};
pub use moving_average::{Ema, Sma, StreamingEma};
pub use signals::{LineCross, ZeroCross};
