use crate::{
    config::HuggingFaceConfig,
    error::{ImageGenError, Result},
    huggingface::traits::{InferenceError, TextToImage},
};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use std::fmt::Display;

/// HTTP client for the HuggingFace inference API.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl InferenceClient {
    pub fn new(config: &HuggingFaceConfig) -> Result<Self> {
        let token = config.require_token()?.clone();

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ImageGenError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn endpoint(&self, model_id: &str) -> String {
        format!("{}/models/{}", self.base_url, model_id)
    }
}

/// Pull a readable message out of an error response.
///
/// The API usually answers `{"error": "..."}` (sometimes with a list of
/// errors); anything else is passed through as text.
fn upstream_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("error") {
            Some(Value::String(msg)) => return msg.clone(),
            Some(Value::Array(errors)) => {
                let joined = errors
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("; ");
                if !joined.is_empty() {
                    return joined;
                }
            }
            _ => {}
        }
    }

    if body.is_empty() {
        format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        )
    } else {
        body.to_string()
    }
}

/// Error body text, or empty when it could not be read.
fn body_or_empty<E: Display>(body: std::result::Result<String, E>) -> String {
    body.unwrap_or_else(|e| {
        log::warn!("Failed to read inference error body: {}", e);
        String::new()
    })
}

// The URL is dropped so that port numbers cannot leak into classification.
fn transport_error(e: reqwest::Error) -> InferenceError {
    let e = e.without_url();
    if e.is_timeout() {
        InferenceError::Transport(format!("Request to inference API timed out: {}", e))
    } else {
        InferenceError::Transport(format!("Failed to reach inference API: {}", e))
    }
}

#[async_trait]
impl TextToImage for InferenceClient {
    async fn text_to_image(
        &self,
        prompt: &str,
        model_id: &str,
    ) -> std::result::Result<Vec<u8>, InferenceError> {
        let url = self.endpoint(model_id);

        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .header(header::ACCEPT, "image/png")
            .json(&json!({ "inputs": prompt }))
            .send()
            .await
            .map_err(|e| {
                log::error!("Inference request failed: {}", e);
                transport_error(e)
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = body_or_empty(response.text().await.map_err(|e| e.without_url()));
            let message = upstream_message(status, &body);

            log::error!("Inference API returned {}: {}", status, message);

            return Err(InferenceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(transport_error)?;

        if bytes.is_empty() {
            return Err(InferenceError::Decode(
                "Inference API returned an empty image".into(),
            ));
        }

        log::debug!("Received {} bytes of image data", bytes.len());

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_from_json() {
        let body = r#"{"error":"Model black-forest-labs/FLUX.1-schnell is currently loading","estimated_time":20.0}"#;
        assert_eq!(
            upstream_message(StatusCode::SERVICE_UNAVAILABLE, body),
            "Model black-forest-labs/FLUX.1-schnell is currently loading"
        );
    }

    #[test]
    fn test_upstream_message_from_error_list() {
        let body = r#"{"error":["bad input","too long"]}"#;
        assert_eq!(
            upstream_message(StatusCode::BAD_REQUEST, body),
            "bad input; too long"
        );
    }

    #[test]
    fn test_upstream_message_plain_and_empty() {
        assert_eq!(
            upstream_message(StatusCode::BAD_GATEWAY, "  upstream exploded \n"),
            "upstream exploded"
        );
        assert_eq!(
            upstream_message(StatusCode::TOO_MANY_REQUESTS, ""),
            "429 Too Many Requests"
        );
    }

    #[test]
    fn test_unreadable_body_falls_back_to_status_reason() {
        let body = body_or_empty::<String>(Err("connection closed mid-body".into()));
        assert_eq!(body, "");
        assert_eq!(
            upstream_message(StatusCode::SERVICE_UNAVAILABLE, &body),
            "503 Service Unavailable"
        );
        assert_eq!(body_or_empty::<String>(Ok("busy".into())), "busy");
    }

    #[test]
    fn test_new_requires_token() {
        let result = InferenceClient::new(&HuggingFaceConfig::new());
        assert!(matches!(result, Err(ImageGenError::MissingCredential)));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let config = HuggingFaceConfig::new()
            .with_token("hf_test")
            .with_base_url("http://localhost:9999/");
        let client = InferenceClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("black-forest-labs/FLUX.1-schnell"),
            "http://localhost:9999/models/black-forest-labs/FLUX.1-schnell"
        );
    }
}
