//! Stock reference data.

use stockstudy_core::types::StockInfo;

/// Result cap used when callers do not pass one.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

const BUILTIN: [(&str, &str); 13] = [
    ("000001", "平安银行"),
    ("000002", "万科A"),
    ("000063", "中兴通讯"),
    ("000333", "美的集团"),
    ("000651", "格力电器"),
    ("000858", "五粮液"),
    ("002415", "海康威视"),
    ("002594", "比亚迪"),
    ("300750", "宁德时代"),
    ("600036", "招商银行"),
    ("600519", "贵州茅台"),
    ("601318", "中国平安"),
    ("601398", "工商银行"),
];

/// Known stocks, used for display names and search.
#[derive(Debug, Clone)]
pub struct StockCatalog {
    stocks: Vec<StockInfo>,
}

impl StockCatalog {
    /// Create a catalog from explicit entries.
    pub fn new(stocks: Vec<StockInfo>) -> Self {
        Self { stocks }
    }

    /// Explicit entries, or the built-in list when none are given.
    pub fn with_fallback(stocks: Vec<StockInfo>) -> Self {
        if stocks.is_empty() {
            Self::builtin()
        } else {
            Self::new(stocks)
        }
    }

    /// The built-in A-share list.
    pub fn builtin() -> Self {
        let stocks = BUILTIN
            .iter()
            .map(|(symbol, name)| StockInfo::new(*symbol, *name).on_exchange(exchange_of(symbol)))
            .collect();
        Self { stocks }
    }

    /// Display name for a symbol, or the symbol itself when unknown.
    pub fn name_of(&self, symbol: &str) -> String {
        self.get(symbol)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| symbol.to_string())
    }

    pub fn get(&self, symbol: &str) -> Option<&StockInfo> {
        self.stocks.iter().find(|s| s.symbol == symbol)
    }

    /// Entries whose symbol contains `query` or whose name contains it,
    /// ignoring case. An empty query lists the first `limit` entries.
    pub fn search(&self, query: &str, limit: usize) -> Vec<StockInfo> {
        let needle = query.trim().to_lowercase();
        self.stocks
            .iter()
            .filter(|s| {
                needle.is_empty()
                    || s.symbol.to_lowercase().contains(&needle)
                    || s.name.to_lowercase().contains(&needle)
            })
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

impl Default for StockCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Shanghai codes start with 6, Shenzhen with 0 or 3.
fn exchange_of(symbol: &str) -> &'static str {
    if symbol.starts_with('6') {
        "SS"
    } else {
        "SZ"
    }
}
