use crate::signature::verify_signature;
use serde::Deserialize;
use stockbot_models::{GatewayError, InboundEvent};

/// Authenticates inbound webhook calls and normalizes their payload.
/// Pure request decoding: no network calls happen here.
pub struct WebhookGateway {
    channel_secret: String,
}

#[derive(Debug, Deserialize)]
struct WebhookEnvelope {
    #[serde(default)]
    events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(rename = "replyToken")]
    reply_token: Option<String>,
    message: Option<WebhookMessage>,
}

#[derive(Debug, Deserialize)]
struct WebhookMessage {
    #[serde(rename = "type")]
    message_type: String,
    text: Option<String>,
}

impl WebhookGateway {
    pub fn new(channel_secret: String) -> Self {
        Self { channel_secret }
    }

    /// Verifies the signature over the raw body, then decodes the platform
    /// envelope. Text messages become `InboundEvent`s; every other event
    /// kind (stickers, follows, images...) is dropped silently.
    pub fn handle(
        &self,
        body: &[u8],
        signature_header: &str,
    ) -> Result<Vec<InboundEvent>, GatewayError> {
        if !verify_signature(&self.channel_secret, body, signature_header) {
            return Err(GatewayError::InvalidSignature);
        }

        let envelope: WebhookEnvelope = serde_json::from_slice(body)?;
        let events = envelope
            .events
            .into_iter()
            .filter_map(|event| {
                if event.event_type != "message" {
                    return None;
                }
                let reply_token = event.reply_token?;
                let message = event.message?;
                if message.message_type != "text" {
                    return None;
                }
                Some(InboundEvent::new(reply_token, message.text?))
            })
            .collect();
        Ok(events)
    }
}
