//! Stock reference data.

use serde::{Deserialize, Serialize};

/// A listed stock known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    /// Ticker code, e.g. "600519"
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Exchange code ("SZ", "SS"), when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

impl StockInfo {
    /// Create a new entry without exchange information.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: None,
        }
    }

    /// Attach an exchange code.
    pub fn on_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }
}
