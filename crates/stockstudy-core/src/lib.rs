//! Core types and traits for the stock study service.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, IndicatorSet, EnrichedBar, SplitSeries)
//! - Series validation and dividing-date partitioning
//! - Core traits for indicators and data sources
//! - The error taxonomy shared by every crate in the workspace

pub mod types;
pub mod traits;
pub mod error;

pub use error::StudyError;
pub use types::*;
pub use traits::*;
