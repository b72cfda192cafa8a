//! CLI command implementations.

pub mod analyze;
pub mod serve;
pub mod stocks;
pub mod validate;
