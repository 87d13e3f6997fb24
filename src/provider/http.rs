//! Shared HTTP client and ElevenLabs header/status utilities.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::error::EchoverseError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
///
/// No request timeout is configured; a stalled transport surfaces as
/// [`EchoverseError::Transport`] when the connection itself fails.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

/// Build ElevenLabs-style headers (`xi-api-key`).
pub fn elevenlabs_headers(api_key: &str, accept: &'static str) -> Result<HeaderMap, EchoverseError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static(accept));
    let mut key = HeaderValue::from_str(api_key)
        .map_err(|_| EchoverseError::Configuration("API key is not a valid header value".into()))?;
    key.set_sensitive(true);
    headers.insert("xi-api-key", key);
    Ok(headers)
}

/// Map a non-success HTTP status and body to a rejection error.
pub fn status_to_error(status: u16, body: &str) -> EchoverseError {
    let message = extract_detail_message(body).unwrap_or_else(|| body.trim().to_string());
    EchoverseError::rejected(status, message)
}

/// ElevenLabs errors look like `{"detail": {"status": "..", "message": ".."}}`
/// or `{"detail": ".."}`.
fn extract_detail_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    let detail = parsed.get("detail")?;
    if let Some(message) = detail.as_str() {
        return Some(message.to_string());
    }
    detail
        .get("message")
        .and_then(|message| message.as_str())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_to_error_prefers_detail_message() {
        let body = r#"{"detail":{"status":"invalid_api_key","message":"Invalid API key"}}"#;
        assert_eq!(
            status_to_error(401, body),
            EchoverseError::rejected(401, "Invalid API key")
        );
    }

    #[test]
    fn status_to_error_accepts_string_detail() {
        let body = r#"{"detail":"voice not found"}"#;
        assert_eq!(
            status_to_error(404, body),
            EchoverseError::rejected(404, "voice not found")
        );
    }

    #[test]
    fn status_to_error_falls_back_to_raw_body() {
        assert_eq!(
            status_to_error(502, " bad gateway \n"),
            EchoverseError::rejected(502, "bad gateway")
        );
    }

    #[test]
    fn headers_carry_api_key_and_mark_it_sensitive() {
        let headers = elevenlabs_headers("k1", "audio/mpeg").unwrap();
        let key = headers.get("xi-api-key").unwrap();
        assert_eq!(key, "k1");
        assert!(key.is_sensitive());
        assert_eq!(headers.get(ACCEPT).unwrap(), "audio/mpeg");
    }

    #[test]
    fn headers_reject_non_ascii_key() {
        let err = elevenlabs_headers("bad\nkey", "audio/mpeg").unwrap_err();
        assert!(matches!(err, EchoverseError::Configuration(_)));
    }
}
