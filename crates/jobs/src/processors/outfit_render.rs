//! Outfit-render processor: compose a full outfit-on-model photograph.
//!
//! Resolves every selected item's best image (product shot preferred),
//! the user's body-shot pointer (required), and a headshot (explicit or
//! pointer, required), then composes either directly (one model call) or
//! through the staged mannequin pipeline when the item images exceed the
//! model's input ceiling.

use attire_core::prompts;
use attire_core::workflow::{select_workflow, CompositionStrategy};
use attire_core::Id;
use attire_gateway::InlineImage;
use attire_store::models::{
    ImagePayload, ImageSource, Job, LinkKind, NewOutfitRender, RenderStatus,
};

use crate::context::JobContext;
use crate::error::ProcessorError;
use crate::inputs::{decode_input, OutfitRenderInput, OutfitRenderResult};

pub async fn run(ctx: &JobContext, job: &Job) -> Result<serde_json::Value, ProcessorError> {
    let input: OutfitRenderInput = decode_input(&job.input)?;

    let outfit = ctx
        .outfits
        .find_outfit(input.outfit_id)
        .await?
        .ok_or_else(|| {
            ProcessorError::Validation(format!("outfit {} does not exist", input.outfit_id))
        })?;
    if outfit.owner_id != job.owner_id {
        return Err(ProcessorError::Validation(format!(
            "outfit {} does not belong to the job owner",
            outfit.id
        )));
    }
    if input.selected_item_ids.is_empty() {
        return Err(ProcessorError::Validation(
            "selected_item_ids must not be empty".into(),
        ));
    }

    let pointers = ctx.profiles.pointers(job.owner_id).await?;
    let body_shot_id = pointers.current_body_shot_image_id.ok_or_else(|| {
        ProcessorError::Validation(
            "no body shot available: generate a body shot before rendering outfits".into(),
        )
    })?;
    let headshot_id = input
        .headshot_image_id
        .or(pointers.current_headshot_image_id)
        .ok_or_else(|| {
            ProcessorError::Validation(
                "no headshot available: pass headshot_image_id or generate a headshot first"
                    .into(),
            )
        })?;

    let mut item_images: Vec<ImagePayload> = Vec::with_capacity(input.selected_item_ids.len());
    for item_id in &input.selected_item_ids {
        let image_id = best_image_for_item(ctx, *item_id).await?;
        item_images.push(ctx.media.download(image_id).await?);
    }
    let body = ctx.media.download(body_shot_id).await?;
    let headshot = ctx.media.download(headshot_id).await?;

    let strategy = select_workflow(item_images.len(), ctx.config.model_input_ceiling);
    let style_notes = input
        .settings
        .get("style_notes")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    tracing::info!(
        job_id = %job.id,
        outfit_id = %outfit.id,
        item_count = item_images.len(),
        ?strategy,
        "Rendering outfit",
    );

    let (prompt, bytes, mime_type) = match strategy {
        CompositionStrategy::Direct => {
            let prompt = prompts::outfit_render_prompt(false, style_notes.as_deref());
            let mut images: Vec<InlineImage> = vec![super::inline(body), super::inline(headshot)];
            images.extend(item_images.into_iter().map(super::inline));
            let (bytes, mime_type) = super::generate_image(ctx, prompt.clone(), images).await?;
            (prompt, bytes, mime_type)
        }
        CompositionStrategy::Staged => {
            // First call: collapse the unbounded item set into one
            // mannequin image.
            let (mannequin_bytes, mannequin_mime) = super::generate_image(
                ctx,
                prompts::mannequin_prompt().to_string(),
                item_images.into_iter().map(super::inline).collect(),
            )
            .await?;
            let prompt = prompts::outfit_render_prompt(true, style_notes.as_deref());
            let images = vec![
                super::inline(body),
                InlineImage {
                    bytes: mannequin_bytes,
                    mime_type: mannequin_mime,
                },
                super::inline(headshot),
            ];
            let (bytes, mime_type) = super::generate_image(ctx, prompt.clone(), images).await?;
            (prompt, bytes, mime_type)
        }
    };

    let image = ctx
        .media
        .upload(job.owner_id, bytes, &mime_type, ImageSource::AiGenerated)
        .await?;

    let render = ctx
        .outfits
        .append_render(NewOutfitRender {
            outfit_id: outfit.id,
            image_id: image.id,
            prompt,
            settings: input.settings,
            status: RenderStatus::Succeeded,
        })
        .await?;

    // Last-render-wins: the cover always moves to the newest render.
    ctx.outfits.set_cover_image(outfit.id, image.id).await?;

    let result = OutfitRenderResult {
        render_id: render.id,
        image_id: image.id,
        strategy: match strategy {
            CompositionStrategy::Direct => "direct",
            CompositionStrategy::Staged => "staged",
        },
    };
    Ok(serde_json::to_value(result)
        .map_err(|e| ProcessorError::Validation(format!("unencodable result: {e}")))?)
}

/// An item's best available image: the product-shot variant when one
/// exists, otherwise the first link by sort order.
async fn best_image_for_item(ctx: &JobContext, item_id: Id) -> Result<Id, ProcessorError> {
    let links = ctx.items.links_for_item(item_id).await?;
    links
        .iter()
        .find(|l| l.kind == LinkKind::ProductShot)
        .or_else(|| links.first())
        .map(|l| l.image_id)
        .ok_or_else(|| ProcessorError::Validation(format!("item {item_id} has no image")))
}
