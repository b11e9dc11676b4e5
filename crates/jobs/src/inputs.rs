//! Typed input and result contracts, one pair per job type.
//!
//! `job.input` is decoded strictly into the matching input struct before a
//! processor runs; a payload that does not fit fails the job with a
//! validation error. Results serialize into `job.result` on the terminal
//! write and are versioned contracts consumed by clients.

use attire_core::Id;
use serde::{Deserialize, Serialize};

use crate::error::ProcessorError;

/// Decode a job's input payload into its typed contract.
pub fn decode_input<T: serde::de::DeserializeOwned>(
    input: &serde_json::Value,
) -> Result<T, ProcessorError> {
    serde_json::from_value(input.clone())
        .map_err(|e| ProcessorError::Validation(format!("invalid job input: {e}")))
}

// ---------------------------------------------------------------------------
// tag
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TagInput {
    pub item_id: Id,
    pub image_ids: Vec<Id>,
    pub category_context: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagResult {
    pub attributes_written: usize,
    pub category_id: Option<Id>,
    pub subcategory_id: Option<Id>,
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// product_shot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ProductShotInput {
    pub image_id: Id,
    pub item_id: Id,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductShotResult {
    pub image_id: Id,
    pub link_id: Id,
}

// ---------------------------------------------------------------------------
// headshot_generate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HeadshotInput {
    pub selfie_image_id: Id,
    pub hair_style: Option<String>,
    pub makeup_style: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadshotResult {
    pub image_id: Id,
}

// ---------------------------------------------------------------------------
// body_shot_generate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct BodyShotInput {
    pub body_photo_image_id: Id,
    pub headshot_image_id: Option<Id>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyShotResult {
    pub image_id: Id,
}

// ---------------------------------------------------------------------------
// outfit_render
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct OutfitRenderInput {
    pub outfit_id: Id,
    pub selected_item_ids: Vec<Id>,
    pub headshot_image_id: Option<Id>,
    /// Free-form render settings (scene, mood). `style_notes` is merged
    /// into the prompt; the whole map is persisted on the render record.
    #[serde(default)]
    pub settings: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutfitRenderResult {
    pub render_id: Id,
    pub image_id: Id,
    /// `"direct"` or `"staged"`.
    pub strategy: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn decode_rejects_wrong_shape() {
        let err = decode_input::<TagInput>(&serde_json::json!({"item_id": 7})).unwrap_err();
        assert_matches!(err, ProcessorError::Validation(_));
    }

    #[test]
    fn decode_accepts_optional_fields_missing() {
        let input: BodyShotInput = decode_input(&serde_json::json!({
            "body_photo_image_id": Id::new_v4(),
        }))
        .unwrap();
        assert!(input.headshot_image_id.is_none());
    }
}
