use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Checks a webhook signature header against the raw request body.
///
/// The platform signs the body with HMAC-SHA256 keyed by the channel secret
/// and sends the base64 digest in the header. Comparison runs through
/// `Mac::verify_slice`, so it is constant-time.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature_header: &str) -> bool {
    let Ok(expected) = BASE64.decode(signature_header) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Computes the header value the platform would send for `body`.
pub fn sign_body(channel_secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .expect("HMAC can take a key of any size");
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}
