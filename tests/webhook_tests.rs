// End-to-end webhook tests: signature gate, event routing, reply delivery.
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::{Arc, Mutex};
use stockbot_api::{create_routes, sign_body, AppState, WebhookGateway};
use stockbot_models::ChatError;
use stockbot_services::{ChatClient, FixedQuotes, MessageRouter};
use tower::ServiceExt;

const SECRET: &str = "test-channel-secret";

/// Chat double that records deliveries instead of calling the platform.
#[derive(Default)]
struct RecordingChat {
    replies: Mutex<Vec<(String, String)>>,
    broadcasts: Mutex<Vec<String>>,
}

#[async_trait]
impl ChatClient for RecordingChat {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), ChatError> {
        self.replies
            .lock()
            .unwrap()
            .push((reply_token.to_string(), text.to_string()));
        Ok(())
    }

    async fn broadcast(&self, text: &str) -> Result<(), ChatError> {
        self.broadcasts.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn test_app(chat: Arc<RecordingChat>) -> axum::Router {
    let state = AppState {
        gateway: Arc::new(WebhookGateway::new(SECRET.to_string())),
        router: Arc::new(MessageRouter::new(Arc::new(FixedQuotes::sample()))),
        chat,
    };
    create_routes().with_state(state)
}

fn callback_request(body: &str, signature: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/callback")
        .header("content-type", "application/json")
        .header("x-line-signature", signature)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn text_event_body(reply_token: &str, text: &str) -> String {
    format!(
        r#"{{"events":[{{"type":"message","replyToken":"{reply_token}","message":{{"type":"text","text":"{text}"}}}}]}}"#
    )
}

#[tokio::test]
async fn signed_price_query_gets_a_quote_reply() {
    let chat = Arc::new(RecordingChat::default());
    let app = test_app(Arc::clone(&chat));

    let body = text_event_body("rt-1", "2317");
    let signature = sign_body(SECRET, body.as_bytes());
    let response = app.oneshot(callback_request(&body, &signature)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let replies = chat.replies.lock().unwrap();
    assert_eq!(
        *replies,
        vec![("rt-1".to_string(), "2317 (鴻海) 現價: 105.5 元".to_string())]
    );
}

#[tokio::test]
async fn flipped_signature_byte_is_rejected_and_nothing_runs() {
    let chat = Arc::new(RecordingChat::default());
    let app = test_app(Arc::clone(&chat));

    let body = text_event_body("rt-1", "2317");
    let mut sig_bytes = BASE64.decode(sign_body(SECRET, body.as_bytes())).unwrap();
    sig_bytes[0] ^= 0x01;
    let bad_signature = BASE64.encode(&sig_bytes);

    let response = app
        .oneshot(callback_request(&body, &bad_signature))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(chat.replies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_signature_header_is_rejected() {
    let chat = Arc::new(RecordingChat::default());
    let app = test_app(Arc::clone(&chat));

    let body = text_event_body("rt-1", "2317");
    let request = Request::builder()
        .method("POST")
        .uri("/callback")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(chat.replies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unrecognized_text_gets_the_guidance_reply() {
    let chat = Arc::new(RecordingChat::default());
    let app = test_app(Arc::clone(&chat));

    let body = text_event_body("rt-9", "hello bot");
    let signature = sign_body(SECRET, body.as_bytes());
    let response = app.oneshot(callback_request(&body, &signature)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let replies = chat.replies.lock().unwrap();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].1.contains("2317"));
    assert!(replies[0].1.contains("股票代號"));
}

#[tokio::test]
async fn non_text_events_are_acknowledged_without_replies() {
    let chat = Arc::new(RecordingChat::default());
    let app = test_app(Arc::clone(&chat));

    let body = r#"{"events":[{"type":"message","replyToken":"rt-1","message":{"type":"sticker"}}]}"#;
    let signature = sign_body(SECRET, body.as_bytes());
    let response = app.oneshot(callback_request(body, &signature)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(chat.replies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn health_endpoint_answers_without_authentication() {
    let app = test_app(Arc::new(RecordingChat::default()));
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
