//! Per-user generation pointers.

use attire_core::Id;
use serde::{Deserialize, Serialize};

/// Last-write-wins pointers to a user's current generated identity images.
/// Mutated only by successful headshot / body-shot jobs, through the
/// guarded [`ProfileStore`](crate::ProfileStore) setters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationPointers {
    pub current_headshot_image_id: Option<Id>,
    pub current_body_shot_image_id: Option<Id>,
}
