//! Cross-signal detection.
//!
//! A cross is reported on the bar where it completes, and only when both the
//! previous and the current values are defined. Each detector returns at most
//! one variant per bar, so opposing flags can never be set together.

use serde::{Deserialize, Serialize};

/// A faster line crossing a slower one (K over D for KDJ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCross {
    /// Fast line moved from below to at-or-above the slow line
    Golden,
    /// Fast line moved from above to at-or-below the slow line
    Death,
}

/// A line crossing the zero axis (MACD DIFF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroCross {
    Up,
    Down,
}

/// Classify the step from `(prev_fast, prev_slow)` to `(fast, slow)`.
pub fn line_cross(prev_fast: f64, prev_slow: f64, fast: f64, slow: f64) -> Option<LineCross> {
    if prev_fast < prev_slow && fast >= slow {
        Some(LineCross::Golden)
    } else if prev_fast > prev_slow && fast <= slow {
        Some(LineCross::Death)
    } else {
        None
    }
}

/// Classify the step from `prev` to `current` relative to zero.
pub fn zero_cross(prev: f64, current: f64) -> Option<ZeroCross> {
    if prev < 0.0 && current >= 0.0 {
        Some(ZeroCross::Up)
    } else if prev > 0.0 && current <= 0.0 {
        Some(ZeroCross::Down)
    } else {
        None
    }
}

/// Line crosses over aligned `(fast, slow)` pairs.
pub fn detect_line_crosses(pairs: &[Option<(f64, f64)>]) -> Vec<Option<LineCross>> {
    let mut result = vec![None; pairs.len()];
    for i in 1..pairs.len() {
        if let (Some((pf, ps)), Some((f, s))) = (pairs[i - 1], pairs[i]) {
            result[i] = line_cross(pf, ps, f, s);
        }
    }
    result
}

/// Zero-axis crosses over an aligned series.
pub fn detect_zero_crosses(values: &[Option<f64>]) -> Vec<Option<ZeroCross>> {
    let mut result = vec![None; values.len()];
    for i in 1..values.len() {
        if let (Some(prev), Some(current)) = (values[i - 1], values[i]) {
            result[i] = zero_cross(prev, current);
        }
    }
    result
}
