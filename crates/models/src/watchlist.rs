use serde::{Deserialize, Serialize};

/// One labelled group of instruments in the daily report, in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchCategory {
    pub label: String,
    pub instrument_ids: Vec<String>,
}

/// Static, ordered mapping of category label to instrument ids. Built once
/// at startup, read-only for the rest of the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Watchlist {
    pub categories: Vec<WatchCategory>,
}

impl Watchlist {
    pub fn new(categories: Vec<WatchCategory>) -> Self {
        Self { categories }
    }

    pub fn with_category(mut self, label: &str, instrument_ids: &[&str]) -> Self {
        self.categories.push(WatchCategory {
            label: label.to_string(),
            instrument_ids: instrument_ids.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn instrument_count(&self) -> usize {
        self.categories.iter().map(|c| c.instrument_ids.len()).sum()
    }

    /// Default market-open report: index ETFs plus a handful of large caps.
    pub fn default_report() -> Self {
        Self::default()
            .with_category("ETF", &["0050", "006208"])
            .with_category("個股", &["2317", "2330", "2454"])
    }
}
