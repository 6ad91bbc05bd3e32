use crate::formatter::format_quote_line;
use crate::price_source::PriceSource;
use std::sync::Arc;
use stockbot_models::{Command, InboundEvent};

const GUIDANCE_MESSAGE: &str = "請輸入股票代號查詢即時股價，例如：2317";

/// Dispatches normalized inbound events. Total: every event produces reply
/// text, and fetch failures come back as formatted error lines rather than
/// errors.
pub struct MessageRouter {
    price_source: Arc<dyn PriceSource>,
}

impl MessageRouter {
    pub fn new(price_source: Arc<dyn PriceSource>) -> Self {
        Self { price_source }
    }

    pub async fn route(&self, event: &InboundEvent) -> String {
        match Command::classify(&event.text) {
            Command::PriceQuery(instrument_id) => {
                let result = self.price_source.fetch(&instrument_id).await;
                if let Err(e) = &result {
                    tracing::warn!(instrument_id, error = %e, "📉 Quote fetch failed");
                }
                format_quote_line(&instrument_id, &result)
            }
            Command::Unrecognized(text) => {
                tracing::debug!(text, "💬 Unrecognized input, sending guidance");
                GUIDANCE_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_source::FixedQuotes;
    use async_trait::async_trait;
    use stockbot_models::{FetchError, FetchResult, PriceQuote};

    struct FailingSource(fn(&str) -> FetchError);

    #[async_trait]
    impl PriceSource for FailingSource {
        async fn fetch(&self, instrument_id: &str) -> FetchResult<PriceQuote> {
            Err((self.0)(instrument_id))
        }
    }

    fn event(text: &str) -> InboundEvent {
        InboundEvent::new("reply-token".to_string(), text.to_string())
    }

    #[tokio::test]
    async fn digit_query_replies_with_a_quote_line() {
        let router = MessageRouter::new(Arc::new(FixedQuotes::sample()));
        let reply = router.route(&event("2317")).await;
        assert_eq!(reply, "2317 (鴻海) 現價: 105.5 元");
    }

    #[tokio::test]
    async fn non_digit_text_gets_the_fixed_guidance() {
        let router = MessageRouter::new(Arc::new(FixedQuotes::sample()));
        for text in ["hello", "2317?", "買什麼好", ""] {
            assert_eq!(router.route(&event(text)).await, GUIDANCE_MESSAGE);
        }
    }

    #[tokio::test]
    async fn transport_failure_becomes_reply_text_not_an_error() {
        let router = MessageRouter::new(Arc::new(FailingSource(|_| FetchError::Transport {
            reason: "connection refused".to_string(),
        })));
        let reply = router.route(&event("9999")).await;
        assert!(reply.contains("9999"));
        assert!(reply.contains("無法取得股價"));
    }

    #[tokio::test]
    async fn unknown_instrument_becomes_reply_text() {
        let router = MessageRouter::new(Arc::new(FixedQuotes::sample()));
        let reply = router.route(&event("1234")).await;
        assert!(reply.contains("查詢失敗"));
    }
}
