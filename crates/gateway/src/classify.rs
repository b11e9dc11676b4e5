//! Ordered classification of a decoded model response.
//!
//! Rules, evaluated in order:
//! 1. explicit prompt-level block reason → `SafetyBlocked`;
//! 2. a non-STOP finish reason → `SafetyBlocked` for the safety family,
//!    `Malformed` for everything else (max tokens, unknown reasons);
//! 3. no candidate → `Empty`;
//! 4. an IMAGE request whose only content is text → `Refused`;
//! 5. missing or undecodable binary payload → `Malformed`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::GatewayError;
use crate::types::{ModelOutput, ResponseModality};
use crate::wire::GenerateContentResponse;

/// Finish reasons that indicate a policy block rather than a technical
/// deviation.
const SAFETY_FINISH_REASONS: &[&str] =
    &["SAFETY", "RECITATION", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

/// Default mime type when the model omits one on an inline payload.
const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Classify a decoded response into a single output or a single failure.
pub fn classify(
    response: GenerateContentResponse,
    modality: ResponseModality,
) -> Result<ModelOutput, GatewayError> {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return Err(GatewayError::SafetyBlocked {
                reason: reason.clone(),
            });
        }
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GatewayError::Empty);
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if reason != "STOP" {
            if SAFETY_FINISH_REASONS.contains(&reason) {
                return Err(GatewayError::SafetyBlocked {
                    reason: reason.to_string(),
                });
            }
            return Err(GatewayError::Malformed(format!(
                "unexpected finish reason {reason}"
            )));
        }
    }

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

    match modality {
        ResponseModality::Image => {
            if let Some(inline) = parts.iter().find_map(|p| p.inline_data.as_ref()) {
                let bytes = BASE64
                    .decode(inline.data.as_bytes())
                    .map_err(|e| GatewayError::Malformed(format!("bad base64 payload: {e}")))?;
                if bytes.is_empty() {
                    return Err(GatewayError::Malformed("empty image payload".into()));
                }
                return Ok(ModelOutput::Image {
                    bytes,
                    mime_type: inline
                        .mime_type
                        .clone()
                        .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
                });
            }
            // Text-only answer to an image request: the model declined.
            let message = collect_text(&parts);
            if !message.is_empty() {
                return Err(GatewayError::Refused { message });
            }
            Err(GatewayError::Malformed(
                "candidate carried neither image nor text content".into(),
            ))
        }
        ResponseModality::Text => {
            let text = collect_text(&parts);
            if text.is_empty() {
                return Err(GatewayError::Malformed(
                    "candidate carried no text content".into(),
                ));
            }
            Ok(ModelOutput::Text(text))
        }
    }
}

fn collect_text(parts: &[crate::wire::Part]) -> String {
    parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_string()
}
