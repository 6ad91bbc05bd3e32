use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last-trade price as reported by the provider.
///
/// The exchange feed uses a dash placeholder before the first trade of the
/// day; keeping it as its own variant means the formatter can never render
/// it as a numeric price. `Traded` carries the provider's price text
/// verbatim (e.g. "105.5000") rather than a parsed number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LastPrice {
    Traded(String),
    NoTrade,
}

impl LastPrice {
    /// Maps the provider's raw price field, treating `-` as the
    /// no-trade-yet sentinel.
    pub fn from_provider(raw: &str) -> Self {
        if raw == "-" {
            LastPrice::NoTrade
        } else {
            LastPrice::Traded(raw.to_string())
        }
    }

    pub fn is_traded(&self) -> bool {
        matches!(self, LastPrice::Traded(_))
    }
}

/// One fetched quote. Immutable once constructed; never cached or merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceQuote {
    pub instrument_id: String,
    pub display_name: Option<String>,
    pub last_price: LastPrice,
    pub fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(instrument_id: String, display_name: Option<String>, last_price: LastPrice) -> Self {
        Self {
            instrument_id,
            display_name,
            last_price,
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_maps_to_no_trade_sentinel() {
        assert_eq!(LastPrice::from_provider("-"), LastPrice::NoTrade);
        assert!(!LastPrice::from_provider("-").is_traded());
    }

    #[test]
    fn numeric_text_is_kept_verbatim() {
        let price = LastPrice::from_provider("105.5000");
        assert_eq!(price, LastPrice::Traded("105.5000".to_string()));
    }

    #[test]
    fn quote_carries_instrument_and_name() {
        let quote = PriceQuote::new(
            "2317".to_string(),
            Some("鴻海".to_string()),
            LastPrice::Traded("105.5".to_string()),
        );
        assert_eq!(quote.instrument_id, "2317");
        assert_eq!(quote.display_name.as_deref(), Some("鴻海"));
        assert!(quote.last_price.is_traded());
    }
}
