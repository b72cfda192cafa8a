//! Indicator trait definitions.
//!
//! Every indicator returns one slot per input point, aligned by index. A slot
//! is `None` while the indicator lacks history, so callers can zip the output
//! with the input series without offset bookkeeping.

use crate::types::Bar;

/// Trait for single-value technical indicators over one input column.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically closes or volumes)
    ///
    /// # Returns
    /// A vector with the same length as `data`
    fn calculate(&self, data: &[f64]) -> Vec<Option<Self::Output>>;

    /// Get the minimum data points required for the first value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Multi-output indicator (e.g., MACD).
///
/// Some indicators produce several related values per point.
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values for the given data, aligned with `data`.
    fn calculate(&self, data: &[f64]) -> Vec<Option<Self::Outputs>>;

    /// Get the minimum data points required for the first value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Indicator that needs whole bars (high/low/close), not a single column.
pub trait BarIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values from bars, aligned with `bars`.
    fn calculate(&self, bars: &[Bar]) -> Vec<Option<Self::Output>>;

    /// Get the minimum bars required for the first value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
