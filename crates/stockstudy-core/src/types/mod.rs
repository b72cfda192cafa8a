//! Core data types.

mod indicator_set;
mod ohlcv;
mod stock;

pub use indicator_set::{EnrichedBar, IndicatorSet, SplitSeries};
pub use ohlcv::{split_at_date, validate_series, Bar, SeriesExt};
pub use stock::StockInfo;
