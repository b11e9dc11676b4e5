//! Request/response types and the [`GenerativeModel`] seam.

use async_trait::async_trait;

use crate::error::GatewayError;

/// Desired response modality for a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseModality {
    Image,
    Text,
}

impl ResponseModality {
    /// Wire name used in `generationConfig.responseModalities`.
    pub fn wire_name(self) -> &'static str {
        match self {
            ResponseModality::Image => "IMAGE",
            ResponseModality::Text => "TEXT",
        }
    }
}

/// One inline image payload sent alongside the prompt. Order matters: the
/// prompt text references images by position (first, second, …).
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// A single generation call: prompt plus ordered image payloads.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub images: Vec<InlineImage>,
    /// Model identifier, e.g. `gemini-2.5-flash-image`.
    pub model: String,
    pub modality: ResponseModality,
}

/// Successful model output.
#[derive(Debug, Clone)]
pub enum ModelOutput {
    Image { bytes: Vec<u8>, mime_type: String },
    Text(String),
}

impl ModelOutput {
    /// The text payload, if this output is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ModelOutput::Text(text) => Some(text),
            ModelOutput::Image { .. } => None,
        }
    }
}

/// The seam job processors call the generation model through. Implemented
/// by [`GeminiGateway`](crate::GeminiGateway) in production and by scripted
/// doubles in tests.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<ModelOutput, GatewayError>;
}
