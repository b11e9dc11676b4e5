//! The five type-specific job processors.

pub mod body_shot;
pub mod headshot;
pub mod outfit_render;
pub mod product_shot;
pub mod tag;

use attire_gateway::{GenerateRequest, InlineImage, ModelOutput, ResponseModality};
use attire_store::models::ImagePayload;

use crate::context::JobContext;
use crate::error::ProcessorError;

/// Convert a downloaded payload into a model input part.
fn inline(payload: ImagePayload) -> InlineImage {
    InlineImage {
        bytes: payload.bytes,
        mime_type: payload.mime_type,
    }
}

/// Run one IMAGE-modality generation call and unwrap the binary output.
async fn generate_image(
    ctx: &JobContext,
    prompt: String,
    images: Vec<InlineImage>,
) -> Result<(Vec<u8>, String), ProcessorError> {
    let output = ctx
        .model
        .generate(GenerateRequest {
            prompt,
            images,
            model: ctx.config.image_model.clone(),
            modality: ResponseModality::Image,
        })
        .await?;
    match output {
        ModelOutput::Image { bytes, mime_type } => Ok((bytes, mime_type)),
        ModelOutput::Text(_) => Err(ProcessorError::Gateway(
            attire_gateway::GatewayError::Malformed(
                "model returned text for an image request".into(),
            ),
        )),
    }
}
