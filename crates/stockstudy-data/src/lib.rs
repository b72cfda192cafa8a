//! Data sources for the stock study service.
//!
//! Providers implement [`stockstudy_core::traits::DataSource`] and hand back date-ordered daily bars.
//! The crate also carries the in-memory response cache and the stock catalog.

mod cache;
mod catalog;
mod csv_source;
mod mock;

pub use cache::TimedCache;
pub use catalog::{StockCatalog, DEFAULT_SEARCH_LIMIT};
pub use csv_source::CsvDataSource;
pub use mock::MockDataSource;

use chrono::NaiveDate;
use stockstudy_core::error::DataError;

pub(crate) fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), DataError> {
    if start > end {
        return Err(DataError::InvalidRange { start, end });
    }
    Ok(())
}
