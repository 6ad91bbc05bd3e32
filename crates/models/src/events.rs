use serde::{Deserialize, Serialize};

/// Normalized inbound chat event: one per text message in a webhook call.
/// Created by the gateway, consumed by the router, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InboundEvent {
    /// Opaque token the chat platform uses to route the reply back to the
    /// originating conversation.
    pub reply_token: String,
    pub text: String,
}

impl InboundEvent {
    pub fn new(reply_token: String, text: String) -> Self {
        Self { reply_token, text }
    }
}

/// What the user asked for, classified ahead of routing so dispatch is a
/// total match over a closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    PriceQuery(String),
    Unrecognized(String),
}

impl Command {
    /// Pure classification: a message that is nothing but ASCII digits is
    /// taken as an instrument id, anything else is unrecognized input.
    /// Surrounding whitespace is ignored, matching how users paste codes.
    pub fn classify(text: &str) -> Self {
        let trimmed = text.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            Command::PriceQuery(trimmed.to_string())
        } else {
            Command::Unrecognized(trimmed.to_string())
        }
    }
}
