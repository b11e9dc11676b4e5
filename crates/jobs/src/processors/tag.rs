//! Tag processor: analyze an item photo into structured attributes,
//! category recognition, and suggested copy.

use attire_core::category::match_canonical;
use attire_core::prompts;
use attire_core::Id;
use attire_gateway::{GatewayError, GenerateRequest, ModelOutput, ResponseModality};
use attire_store::models::{AttributeSource, ItemPatch, Job, NewEntityAttribute};
use serde::Deserialize;

use crate::context::JobContext;
use crate::error::ProcessorError;
use crate::inputs::{decode_input, TagInput, TagResult};

/// Entity type written on attribute rows for wardrobe items.
const ITEM_ENTITY_TYPE: &str = "item";

/// The structured object the tagging model must answer with. Decoded
/// strictly: any deviation is a single upstream-malformed failure, with no
/// repair or retry.
#[derive(Debug, Deserialize)]
struct TagAnalysis {
    #[serde(default)]
    attributes: Vec<AttributeGuess>,
    recognized_category: Option<String>,
    recognized_subcategory: Option<String>,
    primary_color: Option<String>,
    suggested_title: Option<String>,
    suggested_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AttributeGuess {
    key: String,
    #[serde(default)]
    values: Vec<ValueGuess>,
}

#[derive(Debug, Deserialize)]
struct ValueGuess {
    value: String,
    confidence: Option<f64>,
}

pub async fn run(ctx: &JobContext, job: &Job) -> Result<serde_json::Value, ProcessorError> {
    let input: TagInput = decode_input(&job.input)?;

    let first_image_id = *input
        .image_ids
        .first()
        .ok_or_else(|| ProcessorError::Validation("image_ids must not be empty".into()))?;

    if ctx.items.find_item(input.item_id).await?.is_none() {
        return Err(ProcessorError::Validation(format!(
            "item {} does not exist",
            input.item_id
        )));
    }

    let payload = ctx.media.download(first_image_id).await?;
    let categories = ctx.items.categories().await?;
    let category_names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();

    let prompt = prompts::tagging_prompt(&category_names, input.category_context.as_deref());
    let output = ctx
        .model
        .generate(GenerateRequest {
            prompt,
            images: vec![super::inline(payload)],
            model: ctx.config.text_model.clone(),
            modality: ResponseModality::Text,
        })
        .await?;
    let text = match output {
        ModelOutput::Text(text) => text,
        ModelOutput::Image { .. } => {
            return Err(GatewayError::Malformed("expected text, got image".into()).into())
        }
    };

    let analysis = parse_analysis(&text)?;

    // Category recognition: case-insensitive, exact against the canonical
    // list. Unmatched names are dropped, not guessed.
    let category = analysis
        .recognized_category
        .as_deref()
        .and_then(|name| match_canonical(name, categories.iter().map(|c| (c.name.as_str(), c))));
    let subcategory = category.and_then(|cat| {
        analysis.recognized_subcategory.as_deref().and_then(|name| {
            match_canonical(name, cat.subcategories.iter().map(|s| (s.name.as_str(), s)))
        })
    });
    let category_id = category.map(|c| c.id);
    let subcategory_id = subcategory.map(|s| s.id);

    let attributes_written =
        write_attributes(ctx, input.item_id, &analysis.attributes).await?;

    let title = non_empty(analysis.suggested_title);
    let patch = ItemPatch {
        title: title.clone(),
        description: non_empty(analysis.suggested_description),
        category_id,
        subcategory_id,
        primary_color: non_empty(analysis.primary_color),
    };
    if !patch.is_empty() {
        ctx.items.patch_item(input.item_id, patch).await?;
    }

    tracing::info!(
        job_id = %job.id,
        item_id = %input.item_id,
        attributes_written,
        category_matched = category_id.is_some(),
        "Tag analysis applied",
    );

    let result = TagResult {
        attributes_written,
        category_id,
        subcategory_id,
        title,
    };
    Ok(serde_json::to_value(result)
        .map_err(|e| ProcessorError::Validation(format!("unencodable result: {e}")))?)
}

/// Strict decode of the model's answer, tolerating a Markdown code fence
/// around the JSON object but nothing else.
fn parse_analysis(text: &str) -> Result<TagAnalysis, ProcessorError> {
    let body = strip_code_fence(text);
    serde_json::from_str(body).map_err(|e| {
        ProcessorError::Gateway(GatewayError::Malformed(format!(
            "tag analysis is not valid JSON: {e}"
        )))
    })
}

/// Remove a surrounding ``` fence (with optional language tag) if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = match rest.split_once('\n') {
        Some((_lang, body)) => body,
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Upsert definitions/values and insert one attribute row per value, all
/// sourced `ai`. Returns the number of rows written.
async fn write_attributes(
    ctx: &JobContext,
    item_id: Id,
    guesses: &[AttributeGuess],
) -> Result<usize, ProcessorError> {
    let mut written = 0;
    for guess in guesses {
        let key = guess.key.trim();
        if key.is_empty() {
            continue;
        }
        let definition = ctx.items.upsert_attribute_definition(key).await?;
        for value_guess in &guess.values {
            let value = value_guess.value.trim();
            if value.is_empty() {
                continue;
            }
            let canonical = ctx
                .items
                .upsert_attribute_value(definition.id, value)
                .await?;
            ctx.items
                .insert_entity_attribute(NewEntityAttribute {
                    entity_type: ITEM_ENTITY_TYPE.to_string(),
                    entity_id: item_id,
                    definition_id: definition.id,
                    value_id: Some(canonical.id),
                    raw_value: Some(value.to_string()),
                    confidence: value_guess.confidence,
                    source: AttributeSource::Ai,
                })
                .await?;
            written += 1;
        }
    }
    Ok(written)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
