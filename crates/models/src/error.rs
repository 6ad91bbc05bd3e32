use thiserror::Error;

/// Outcome of a single failed quote fetch. Terminal for that attempt -
/// nothing here is retried, and callers turn each variant into a
/// user-visible message instead of propagating it further.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("quote provider unreachable or returned an error status: {reason}")]
    Transport { reason: String },

    #[error("quote payload not in the expected shape: {reason}")]
    Parse { reason: String },

    #[error("instrument not found in provider response: {instrument_id}")]
    NotFound { instrument_id: String },
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("webhook signature did not match the request body")]
    InvalidSignature,

    #[error("webhook payload could not be decoded: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("chat delivery request failed: {reason}")]
    Transport { reason: String },

    #[error("chat platform rejected the message: status {status}")]
    Rejected { status: u16 },
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
