//! Outfit and render-attempt models.

use attire_core::{Id, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outfit {
    pub id: Id,
    pub owner_id: Id,
    /// Repointed to the newest successful render (last-render-wins).
    pub cover_image_id: Option<Id>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    Succeeded,
    Failed,
}

/// One render attempt. The render log is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitRender {
    pub id: Id,
    pub outfit_id: Id,
    pub image_id: Id,
    pub prompt: String,
    pub settings: serde_json::Value,
    pub status: RenderStatus,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewOutfitRender {
    pub outfit_id: Id,
    pub image_id: Id,
    pub prompt: String,
    pub settings: serde_json::Value,
    pub status: RenderStatus,
}
