/// One-shot generation client
///
/// Exactly one POST per call: no retries, no timeout, no streaming.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{info, warn};

use super::wire::{GenerateRequest, GenerateResponse};
use crate::config::Settings;
use crate::error::GenerationError;
use crate::source::ImagePayload;

/// Message used when a failed response carries no `error` field
const GENERIC_FAILURE: &str = "Failed to generate image";

/// Anything that can turn (instruction, model, item) into a composite image
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(
        &self,
        instruction: &str,
        model_image: &ImagePayload,
        item_image: &ImagePayload,
    ) -> Result<ImagePayload, GenerationError>;
}

/// HTTP client for `POST /api/generate`
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GenerationClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_http(reqwest::Client::new(), settings)
    }

    pub fn with_http(http: reqwest::Client, settings: &Settings) -> Self {
        Self {
            http,
            endpoint: settings.generate_endpoint(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The underlying HTTP client, shared with sample fetches
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

#[async_trait]
impl GenerationBackend for GenerationClient {
    async fn generate(
        &self,
        instruction: &str,
        model_image: &ImagePayload,
        item_image: &ImagePayload,
    ) -> Result<ImagePayload, GenerationError> {
        let body = GenerateRequest::new(instruction, model_image, item_image);
        info!("🚀 POST {} (model {}, item {})", self.endpoint, model_image, item_image);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        interpret_response(status, &bytes)
    }
}

/// Map an HTTP status and body onto the generation result
///
/// Non-2xx: failure with the body's `error` field, or a generic message.
/// 2xx: the `imageData` field, or [`GenerationError::Malformed`].
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<ImagePayload, GenerationError> {
    let parsed = serde_json::from_slice::<GenerateResponse>(body);

    if !status.is_success() {
        let message = parsed
            .ok()
            .and_then(|r| r.error)
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        warn!("Generation failed with HTTP {}: {}", status.as_u16(), message);
        return Err(GenerationError::Backend(message));
    }

    match parsed {
        Ok(GenerateResponse { image_data: Some(data), .. }) if !data.is_empty() => {
            info!("✅ Generation succeeded ({} bytes)", data.len());
            Ok(ImagePayload::from_data_uri(data))
        }
        Ok(_) => {
            warn!("Generation response has no imageData");
            Err(GenerationError::Malformed)
        }
        Err(e) => {
            warn!("Generation response is not valid JSON: {}", e);
            Err(GenerationError::Malformed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_returns_exact_payload() {
        let body = br#"{ "imageData": "data:image/png;base64,AAA" }"#;
        let payload = interpret_response(StatusCode::OK, body).unwrap();
        assert_eq!(payload.as_str(), "data:image/png;base64,AAA");
    }

    #[test]
    fn test_server_error_uses_error_field() {
        let body = br#"{ "error": "model overloaded" }"#;
        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
        assert_eq!(err, GenerationError::Backend("model overloaded".to_string()));
        assert_eq!(err.to_string(), "model overloaded");
    }

    #[test]
    fn test_server_error_without_message_is_generic() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);

        let err = interpret_response(StatusCode::BAD_REQUEST, b"{}").unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn test_success_without_image_is_malformed() {
        assert_eq!(interpret_response(StatusCode::OK, b"{}"), Err(GenerationError::Malformed));
        assert_eq!(
            interpret_response(StatusCode::OK, br#"{"imageData":""}"#),
            Err(GenerationError::Malformed)
        );
        assert_eq!(interpret_response(StatusCode::OK, b"not json"), Err(GenerationError::Malformed));
    }

    #[test]
    fn test_client_targets_generate_endpoint() {
        let client = GenerationClient::new(&Settings::with_base_url("http://localhost:3001/"));
        assert_eq!(client.endpoint(), "http://localhost:3001/api/generate");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let client = GenerationClient::new(&Settings::with_base_url("http://127.0.0.1:9"));
        let image = ImagePayload::from_data_uri("data:image/png;base64,AAA");

        let result = client.generate("wear it", &image, &image).await;
        assert!(matches!(result, Err(GenerationError::Network(_))));
    }
}
