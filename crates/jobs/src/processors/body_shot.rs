//! Body-shot processor: compose the user's studio model body from a body
//! photo and a headshot.

use attire_core::prompts;
use attire_store::models::{ImageSource, Job};

use crate::context::JobContext;
use crate::error::ProcessorError;
use crate::inputs::{decode_input, BodyShotInput, BodyShotResult};

pub async fn run(ctx: &JobContext, job: &Job) -> Result<serde_json::Value, ProcessorError> {
    let input: BodyShotInput = decode_input(&job.input)?;

    // Explicit headshot wins; otherwise fall back to the user's pointer.
    let headshot_id = match input.headshot_image_id {
        Some(id) => id,
        None => ctx
            .profiles
            .pointers(job.owner_id)
            .await?
            .current_headshot_image_id
            .ok_or_else(|| {
                ProcessorError::Validation(
                    "no headshot available: pass headshot_image_id or generate a headshot first"
                        .into(),
                )
            })?,
    };

    let body = ctx.media.download(input.body_photo_image_id).await?;
    let headshot = ctx.media.download(headshot_id).await?;

    // Image order matters: the prompt names the body photo first and the
    // headshot second.
    let (bytes, mime_type) = super::generate_image(
        ctx,
        prompts::body_shot_prompt().to_string(),
        vec![super::inline(body), super::inline(headshot)],
    )
    .await?;

    let image = ctx
        .media
        .upload(job.owner_id, bytes, &mime_type, ImageSource::AiGenerated)
        .await?;

    ctx.profiles
        .set_current_body_shot(job.owner_id, image.id)
        .await?;

    tracing::info!(job_id = %job.id, image_id = %image.id, "Body-shot pointer updated");

    let result = BodyShotResult { image_id: image.id };
    Ok(serde_json::to_value(result)
        .map_err(|e| ProcessorError::Validation(format!("unencodable result: {e}")))?)
}
