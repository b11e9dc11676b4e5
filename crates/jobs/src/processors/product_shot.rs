//! Product-shot processor: turn one item photo into a square studio
//! product photo and install it as the item's primary image.

use attire_core::prompts;
use attire_store::models::{ImageSource, Job, LinkKind};

use crate::context::JobContext;
use crate::error::ProcessorError;
use crate::inputs::{decode_input, ProductShotInput, ProductShotResult};

pub async fn run(ctx: &JobContext, job: &Job) -> Result<serde_json::Value, ProcessorError> {
    let input: ProductShotInput = decode_input(&job.input)?;

    let payload = ctx.media.download(input.image_id).await?;
    let (bytes, mime_type) = super::generate_image(
        ctx,
        prompts::product_shot_prompt().to_string(),
        vec![super::inline(payload)],
    )
    .await?;

    let image = ctx
        .media
        .upload(job.owner_id, bytes, &mime_type, ImageSource::AiGenerated)
        .await?;

    // Shift every existing link to positions 1..=N, walking from the
    // highest position down so no two links transiently share an order,
    // then install the product shot at position 0.
    let existing = ctx.items.links_for_item(input.item_id).await?;
    for (index, link) in existing.iter().enumerate().rev() {
        ctx.items
            .set_link_order(link.id, index as i32 + 1)
            .await?;
    }
    let link = ctx
        .items
        .insert_link(input.item_id, image.id, LinkKind::ProductShot, 0)
        .await?;

    tracing::info!(
        job_id = %job.id,
        item_id = %input.item_id,
        image_id = %image.id,
        shifted_links = existing.len(),
        "Product shot installed",
    );

    let result = ProductShotResult {
        image_id: image.id,
        link_id: link.id,
    };
    Ok(serde_json::to_value(result)
        .map_err(|e| ProcessorError::Validation(format!("unencodable result: {e}")))?)
}
