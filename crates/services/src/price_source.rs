use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use stockbot_models::{FetchError, FetchResult, LastPrice, PriceQuote};

/// Where quotes come from. The router and scheduler only ever see this
/// trait, so the structured TWSE API and the fixed placeholder table can be
/// swapped at startup without touching either of them.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// One outbound attempt, no retry. Every failure comes back as a typed
    /// `FetchError`; nothing panics through this boundary.
    async fn fetch(&self, instrument_id: &str) -> FetchResult<PriceQuote>;
}

const TWSE_BASE_URL: &str = "https://mis.twse.com.tw";
const FETCH_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("stockbot-rs/", env!("CARGO_PKG_VERSION"));

/// Quote source backed by the TWSE real-time quote endpoint
/// (`getStockInfo.jsp`), which answers JSON with a `msgArray` of matched
/// instruments.
pub struct TwseQuoteApi {
    client: reqwest::Client,
    base_url: String,
}

impl TwseQuoteApi {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn with_defaults() -> anyhow::Result<Self> {
        Self::new(TWSE_BASE_URL, FETCH_TIMEOUT_SECS)
    }

    fn quote_url(&self, instrument_id: &str) -> String {
        format!(
            "{}/stock/api/getStockInfo.jsp?ex_ch=tse_{}.tw",
            self.base_url, instrument_id
        )
    }
}

#[async_trait]
impl PriceSource for TwseQuoteApi {
    async fn fetch(&self, instrument_id: &str) -> FetchResult<PriceQuote> {
        let response = self
            .client
            .get(self.quote_url(instrument_id))
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                reason: format!("provider answered {status}"),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Transport {
            reason: e.to_string(),
        })?;

        let quote = parse_quote_body(instrument_id, &body)?;
        tracing::debug!(
            instrument_id,
            traded = quote.last_price.is_traded(),
            "📈 Fetched quote"
        );
        Ok(quote)
    }
}

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "msgArray", default)]
    msg_array: Vec<QuoteEntry>,
}

#[derive(Debug, Deserialize)]
struct QuoteEntry {
    /// Short display name, e.g. "鴻海".
    #[serde(rename = "n")]
    name: Option<String>,
    /// Last trade price; `-` before the first trade of the day.
    #[serde(rename = "z")]
    last: Option<String>,
}

/// Parses the TWSE reply for one instrument. Kept free of I/O so the edge
/// cases (sentinel, empty match list, junk body) are unit-testable.
fn parse_quote_body(instrument_id: &str, body: &str) -> FetchResult<PriceQuote> {
    let envelope: QuoteEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::Parse {
            reason: e.to_string(),
        })?;

    let entry = envelope
        .msg_array
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::NotFound {
            instrument_id: instrument_id.to_string(),
        })?;

    let raw_price = entry.last.ok_or_else(|| FetchError::Parse {
        reason: "price field missing from provider entry".to_string(),
    })?;

    Ok(PriceQuote::new(
        instrument_id.to_string(),
        entry.name,
        LastPrice::from_provider(&raw_price),
    ))
}

/// Placeholder quote source: a fixed in-memory table, no network. Used when
/// running without upstream access and as a deterministic base for tests.
pub struct FixedQuotes {
    quotes: HashMap<String, (String, LastPrice)>,
}

impl FixedQuotes {
    pub fn new() -> Self {
        Self {
            quotes: HashMap::new(),
        }
    }

    pub fn with_quote(mut self, instrument_id: &str, name: &str, price: &str) -> Self {
        self.quotes.insert(
            instrument_id.to_string(),
            (name.to_string(), LastPrice::from_provider(price)),
        );
        self
    }

    /// Table used when `provider = "fixed"` is configured.
    pub fn sample() -> Self {
        Self::new()
            .with_quote("2317", "鴻海", "105.5")
            .with_quote("2330", "台積電", "980.0")
            .with_quote("2454", "聯發科", "1250.0")
            .with_quote("0050", "元大台灣50", "182.5")
            .with_quote("006208", "富邦台50", "104.9")
    }
}

impl Default for FixedQuotes {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for FixedQuotes {
    async fn fetch(&self, instrument_id: &str) -> FetchResult<PriceQuote> {
        match self.quotes.get(instrument_id) {
            Some((name, price)) => Ok(PriceQuote::new(
                instrument_id.to_string(),
                Some(name.clone()),
                price.clone(),
            )),
            None => Err(FetchError::NotFound {
                instrument_id: instrument_id.to_string(),
            }),
        }
    }
}
