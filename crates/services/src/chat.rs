use async_trait::async_trait;
use serde_json::json;
use stockbot_models::ChatError;

/// Outbound side of the chat platform: one-to-one replies and the
/// one-to-many subscriber broadcast. Callers treat delivery as
/// fire-and-forget for the end user but log every failure for the operator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), ChatError>;
    async fn broadcast(&self, text: &str) -> Result<(), ChatError>;
}

const LINE_API_BASE_URL: &str = "https://api.line.me/v2/bot";

/// LINE Messaging API client. Both endpoints take a bearer token and a
/// `messages` array; reply additionally needs the event's reply token.
pub struct LineClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl LineClient {
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(LINE_API_BASE_URL, access_token)
    }

    pub fn with_base_url(base_url: impl Into<String>, access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token,
        }
    }

    async fn post_message(&self, path: &str, body: serde_json::Value) -> Result<(), ChatError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ChatError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl ChatClient for LineClient {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), ChatError> {
        let body = json!({
            "replyToken": reply_token,
            "messages": [{ "type": "text", "text": text }],
        });
        self.post_message("/message/reply", body).await
    }

    async fn broadcast(&self, text: &str) -> Result<(), ChatError> {
        let body = json!({
            "messages": [{ "type": "text", "text": text }],
        });
        self.post_message("/message/broadcast", body).await
    }
}
