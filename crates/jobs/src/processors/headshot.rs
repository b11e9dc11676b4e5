//! Headshot processor: stylize a selfie into the user's current headshot.

use attire_core::prompts;
use attire_store::models::{ImageSource, Job};

use crate::context::JobContext;
use crate::error::ProcessorError;
use crate::inputs::{decode_input, HeadshotInput, HeadshotResult};

pub async fn run(ctx: &JobContext, job: &Job) -> Result<serde_json::Value, ProcessorError> {
    let input: HeadshotInput = decode_input(&job.input)?;

    let payload = ctx.media.download(input.selfie_image_id).await?;
    let prompt = prompts::headshot_prompt(
        input.hair_style.as_deref(),
        input.makeup_style.as_deref(),
    );
    let (bytes, mime_type) =
        super::generate_image(ctx, prompt, vec![super::inline(payload)]).await?;

    let image = ctx
        .media
        .upload(job.owner_id, bytes, &mime_type, ImageSource::AiGenerated)
        .await?;

    // Last-write-wins: a successful run always repoints the headshot.
    ctx.profiles
        .set_current_headshot(job.owner_id, image.id)
        .await?;

    tracing::info!(job_id = %job.id, image_id = %image.id, "Headshot pointer updated");

    let result = HeadshotResult { image_id: image.id };
    Ok(serde_json::to_value(result)
        .map_err(|e| ProcessorError::Validation(format!("unencodable result: {e}")))?)
}
