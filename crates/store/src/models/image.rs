//! Image metadata and payload models.

use attire_core::Id;
use serde::{Deserialize, Serialize};

/// Provenance of an image record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    Upload,
    AiGenerated,
}

/// Metadata record for a stored image. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: Id,
    pub owner_id: Id,
    /// Opaque locator into the external blob store.
    pub storage_locator: String,
    pub mime_type: String,
    pub source: ImageSource,
}

/// Raw image bytes plus their mime type, as downloaded from blob storage.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}
