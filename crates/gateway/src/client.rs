//! HTTP client for the `generateContent` endpoint.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::classify::classify;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::types::{GenerateRequest, GenerativeModel, ModelOutput};
use crate::wire::GenerateContentResponse;

/// Production [`GenerativeModel`] over a Gemini-style REST API.
pub struct GeminiGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl GeminiGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling across
    /// gateways).
    pub fn with_client(client: reqwest::Client, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    fn endpoint_for_model(&self, model: &str) -> String {
        let trimmed = model.trim();
        let model_path = if trimmed.starts_with("models/") {
            trimmed.to_string()
        } else {
            format!("models/{trimmed}")
        };
        format!("{}/{}:generateContent", self.config.api_base, model_path)
    }

    /// Build the request body: inline images first (the prompt text refers
    /// to them by position), then the prompt itself.
    fn build_body(request: &GenerateRequest) -> serde_json::Value {
        let mut parts: Vec<serde_json::Value> = request
            .images
            .iter()
            .map(|image| {
                serde_json::json!({
                    "inlineData": {
                        "mimeType": image.mime_type,
                        "data": BASE64.encode(&image.bytes),
                    }
                })
            })
            .collect();
        parts.push(serde_json::json!({ "text": request.prompt }));

        serde_json::json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": {
                "responseModalities": [request.modality.wire_name()],
            },
        })
    }
}

#[async_trait]
impl GenerativeModel for GeminiGateway {
    async fn generate(&self, request: GenerateRequest) -> Result<ModelOutput, GatewayError> {
        let endpoint = self.endpoint_for_model(&request.model);
        let body = Self::build_body(&request);

        tracing::debug!(
            model = %request.model,
            modality = request.modality.wire_name(),
            image_count = request.images.len(),
            "Calling generation model",
        );

        let response = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", &self.config.api_key)
            .timeout(self.config.request_timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Model API returned an error");
            return Err(GatewayError::Transport(format!(
                "model API error ({status}): {body}"
            )));
        }

        let decoded: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(format!("undecodable response body: {e}")))?;

        classify(decoded, request.modality)
    }
}
