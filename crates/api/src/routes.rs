use crate::gateway::WebhookGateway;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use stockbot_models::GatewayError;
use stockbot_services::{ChatClient, MessageRouter};

const SIGNATURE_HEADER: &str = "x-line-signature";

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<WebhookGateway>,
    pub router: Arc<MessageRouter>,
    pub chat: Arc<dyn ChatClient>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/callback", post(webhook_callback))
}

// Liveness probe
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Webhook entry point: authenticate, route each text event, reply.
/// Signature failures answer 400 with nothing else run; reply delivery
/// failures are logged for the operator but never shown to the user.
async fn webhook_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, StatusCode> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::BAD_REQUEST)?;

    let events = state.gateway.handle(&body, signature).map_err(|e| {
        match e {
            GatewayError::InvalidSignature => {
                tracing::warn!("🚫 Webhook rejected: signature mismatch");
            }
            GatewayError::MalformedPayload(ref err) => {
                tracing::warn!(error = %err, "🚫 Webhook rejected: undecodable payload");
            }
        }
        StatusCode::BAD_REQUEST
    })?;

    for event in &events {
        let reply_text = state.router.route(event).await;
        if let Err(e) = state.chat.reply(&event.reply_token, &reply_text).await {
            tracing::error!(error = %e, "❌ Reply delivery failed");
        }
    }

    Ok("OK")
}
