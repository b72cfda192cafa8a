//! Error types for the stock study service.

use chrono::NaiveDate;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Indicator calculation errors.
///
/// Insufficient history is never an error: early indices simply carry no value.
/// These variants cover malformed input, which rejects the whole series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Series not strictly increasing at index {index}: {current} follows {previous}")]
    UnorderedSeries {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Invalid bar at index {index} ({date}): {reason}")]
    InvalidBar {
        index: usize,
        date: NaiveDate,
        reason: String,
    },
}
