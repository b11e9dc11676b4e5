//! The store seams the job pipeline reads and writes through.
//!
//! The real backends (database, blob storage) live outside this workspace;
//! [`MemoryStore`](crate::MemoryStore) implements every seam for tests and
//! local development.

use async_trait::async_trait;
use attire_core::Id;

use crate::error::StoreError;
use crate::models::{
    AttributeDefinition, AttributeValue, Category, EntityAttribute, GenerationPointers, Image,
    ImageLink, ImagePayload, ImageSource, Item, ItemPatch, Job, LinkKind, NewEntityAttribute,
    NewOutfitRender, Outfit, OutfitRender, SubmitJob,
};

/// Keyed job records with an atomic claim transition.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Create a new job in `Queued` status.
    async fn submit(&self, owner_id: Id, job: SubmitJob) -> Result<Job, StoreError>;

    /// Read a job by id. Reads must bypass any cache layer.
    async fn find(&self, id: Id) -> Result<Option<Job>, StoreError>;

    /// Atomically claim a job for execution: a single conditional update
    /// of `Queued | Failed -> Running`. Returns the claimed job, or `None`
    /// when the job is running or already succeeded (including when a
    /// racing caller won the claim). Not a read-then-write.
    async fn try_claim(&self, id: Id) -> Result<Option<Job>, StoreError>;

    /// Terminal write: `Running -> Succeeded` with the result payload.
    /// Rejects with [`StoreError::Conflict`] if the job is not running.
    async fn complete(&self, id: Id, result: serde_json::Value) -> Result<(), StoreError>;

    /// Terminal write: `Running -> Failed` with a human-readable error.
    /// Rejects with [`StoreError::Conflict`] if the job is not running.
    async fn fail(&self, id: Id, error: &str) -> Result<(), StoreError>;
}

/// Blob storage plus image metadata records.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Fetch an image's bytes and mime type from blob storage.
    async fn download(&self, image_id: Id) -> Result<ImagePayload, StoreError>;

    /// Store bytes and create the metadata record. Images are immutable
    /// once created.
    async fn upload(
        &self,
        owner_id: Id,
        bytes: Vec<u8>,
        mime_type: &str,
        source: ImageSource,
    ) -> Result<Image, StoreError>;

    /// Read an image's metadata record.
    async fn find_image(&self, image_id: Id) -> Result<Option<Image>, StoreError>;
}

/// Wardrobe items, their image links, attributes, and the canonical
/// category list.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn find_item(&self, item_id: Id) -> Result<Option<Item>, StoreError>;

    /// Apply the non-`None` fields of `patch` to the item.
    async fn patch_item(&self, item_id: Id, patch: ItemPatch) -> Result<(), StoreError>;

    /// All links for an item, sorted ascending by `sort_order`.
    async fn links_for_item(&self, item_id: Id) -> Result<Vec<ImageLink>, StoreError>;

    async fn insert_link(
        &self,
        item_id: Id,
        image_id: Id,
        kind: LinkKind,
        sort_order: i32,
    ) -> Result<ImageLink, StoreError>;

    async fn set_link_order(&self, link_id: Id, sort_order: i32) -> Result<(), StoreError>;

    /// The canonical category list.
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Find-or-create an attribute definition by key.
    async fn upsert_attribute_definition(
        &self,
        key: &str,
    ) -> Result<AttributeDefinition, StoreError>;

    /// Find-or-create a canonical value under a definition.
    async fn upsert_attribute_value(
        &self,
        definition_id: Id,
        value: &str,
    ) -> Result<AttributeValue, StoreError>;

    async fn insert_entity_attribute(
        &self,
        row: NewEntityAttribute,
    ) -> Result<EntityAttribute, StoreError>;

    async fn attributes_for_entity(
        &self,
        entity_type: &str,
        entity_id: Id,
    ) -> Result<Vec<EntityAttribute>, StoreError>;
}

/// Outfits and their append-only render log.
#[async_trait]
pub trait OutfitStore: Send + Sync {
    async fn find_outfit(&self, outfit_id: Id) -> Result<Option<Outfit>, StoreError>;

    async fn append_render(&self, render: NewOutfitRender) -> Result<OutfitRender, StoreError>;

    async fn set_cover_image(&self, outfit_id: Id, image_id: Id) -> Result<(), StoreError>;
}

/// Per-user generation pointers behind guarded setters.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn pointers(&self, user_id: Id) -> Result<GenerationPointers, StoreError>;

    /// Overwrite the current headshot pointer. Verifies the image exists
    /// and belongs to `user_id`; rejects with [`StoreError::Forbidden`]
    /// otherwise.
    async fn set_current_headshot(&self, user_id: Id, image_id: Id) -> Result<(), StoreError>;

    /// Overwrite the current body-shot pointer, with the same ownership
    /// guard as [`set_current_headshot`](Self::set_current_headshot).
    async fn set_current_body_shot(&self, user_id: Id, image_id: Id) -> Result<(), StoreError>;
}
