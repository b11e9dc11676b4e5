//! In-process store implementation.
//!
//! Backs every store seam with a single `tokio::sync::Mutex` over one state
//! struct, so multi-step writes (claim, link re-indexing, guarded pointer
//! updates) are atomic with respect to each other. Used by the test suites
//! and local development; production backends live outside this workspace.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use attire_core::Id;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::models::{
    AttributeDefinition, AttributeValue, Category, EntityAttribute, GenerationPointers, Image,
    ImageLink, ImagePayload, ImageSource, Item, ItemPatch, Job, JobStatus, LinkKind,
    NewEntityAttribute, NewOutfitRender, Outfit, OutfitRender, SubmitJob,
};
use crate::traits::{ItemStore, JobStore, MediaStore, OutfitStore, ProfileStore};

#[derive(Default)]
struct State {
    jobs: HashMap<Id, Job>,
    images: HashMap<Id, Image>,
    payloads: HashMap<Id, ImagePayload>,
    items: HashMap<Id, Item>,
    links: Vec<ImageLink>,
    categories: Vec<Category>,
    attribute_definitions: Vec<AttributeDefinition>,
    attribute_values: Vec<AttributeValue>,
    entity_attributes: Vec<EntityAttribute>,
    pointers: HashMap<Id, GenerationPointers>,
    outfits: HashMap<Id, Outfit>,
    renders: Vec<OutfitRender>,
}

/// Shared in-memory store. Clone-cheap; all clones see the same state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the canonical category list.
    pub async fn seed_categories(&self, categories: Vec<Category>) {
        self.inner.lock().await.categories = categories;
    }

    /// Insert an item directly (test arrangement).
    pub async fn seed_item(&self, item: Item) {
        self.inner.lock().await.items.insert(item.id, item);
    }

    /// Insert an outfit directly (test arrangement).
    pub async fn seed_outfit(&self, outfit: Outfit) {
        self.inner.lock().await.outfits.insert(outfit.id, outfit);
    }

    /// Render log for an outfit, in append order (test readback).
    pub async fn renders_for_outfit(&self, outfit_id: Id) -> Vec<OutfitRender> {
        self.inner
            .lock()
            .await
            .renders
            .iter()
            .filter(|r| r.outfit_id == outfit_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn submit(&self, owner_id: Id, job: SubmitJob) -> Result<Job, StoreError> {
        let now = chrono::Utc::now();
        let record = Job {
            id: Id::now_v7(),
            kind: job.kind,
            owner_id,
            input: job.input,
            status: JobStatus::Queued,
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
        };
        self.inner.lock().await.jobs.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find(&self, id: Id) -> Result<Option<Job>, StoreError> {
        Ok(self.inner.lock().await.jobs.get(&id).cloned())
    }

    async fn try_claim(&self, id: Id) -> Result<Option<Job>, StoreError> {
        let mut state = self.inner.lock().await;
        let job = state
            .jobs
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "Job", id })?;
        // The compare half of the CAS: only queued or previously failed
        // jobs are claimable. Everything happens under one lock, so two
        // racing callers cannot both observe a claimable status.
        match job.status {
            JobStatus::Queued | JobStatus::Failed => {
                job.status = JobStatus::Running;
                job.error = None;
                job.updated_at = chrono::Utc::now();
                Ok(Some(job.clone()))
            }
            JobStatus::Running | JobStatus::Succeeded => Ok(None),
        }
    }

    async fn complete(&self, id: Id, result: serde_json::Value) -> Result<(), StoreError> {
        let mut state = self.inner.lock().await;
        let job = state
            .jobs
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "Job", id })?;
        if job.status != JobStatus::Running {
            return Err(StoreError::Conflict(format!(
                "cannot complete job {id} in status {:?}",
                job.status
            )));
        }
        job.status = JobStatus::Succeeded;
        job.result = Some(result);
        job.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn fail(&self, id: Id, error: &str) -> Result<(), StoreError> {
        let mut state = self.inner.lock().await;
        let job = state
            .jobs
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "Job", id })?;
        if job.status != JobStatus::Running {
            return Err(StoreError::Conflict(format!(
                "cannot fail job {id} in status {:?}",
                job.status
            )));
        }
        job.status = JobStatus::Failed;
        job.error = Some(error.to_string());
        job.updated_at = chrono::Utc::now();
        Ok(())
    }
}

#[async_trait]
impl MediaStore for MemoryStore {
    async fn download(&self, image_id: Id) -> Result<ImagePayload, StoreError> {
        self.inner
            .lock()
            .await
            .payloads
            .get(&image_id)
            .cloned()
            .ok_or(StoreError::NotFound {
                entity: "Image",
                id: image_id,
            })
    }

    async fn upload(
        &self,
        owner_id: Id,
        bytes: Vec<u8>,
        mime_type: &str,
        source: ImageSource,
    ) -> Result<Image, StoreError> {
        let id = Id::now_v7();
        let image = Image {
            id,
            owner_id,
            storage_locator: format!("mem://{id}"),
            mime_type: mime_type.to_string(),
            source,
        };
        let mut state = self.inner.lock().await;
        state.payloads.insert(
            id,
            ImagePayload {
                bytes,
                mime_type: mime_type.to_string(),
            },
        );
        state.images.insert(id, image.clone());
        Ok(image)
    }

    async fn find_image(&self, image_id: Id) -> Result<Option<Image>, StoreError> {
        Ok(self.inner.lock().await.images.get(&image_id).cloned())
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn find_item(&self, item_id: Id) -> Result<Option<Item>, StoreError> {
        Ok(self.inner.lock().await.items.get(&item_id).cloned())
    }

    async fn patch_item(&self, item_id: Id, patch: ItemPatch) -> Result<(), StoreError> {
        let mut state = self.inner.lock().await;
        let item = state.items.get_mut(&item_id).ok_or(StoreError::NotFound {
            entity: "Item",
            id: item_id,
        })?;
        if let Some(title) = patch.title {
            item.title = Some(title);
        }
        if let Some(description) = patch.description {
            item.description = Some(description);
        }
        if let Some(category_id) = patch.category_id {
            item.category_id = Some(category_id);
        }
        if let Some(subcategory_id) = patch.subcategory_id {
            item.subcategory_id = Some(subcategory_id);
        }
        if let Some(primary_color) = patch.primary_color {
            item.primary_color = Some(primary_color);
        }
        Ok(())
    }

    async fn links_for_item(&self, item_id: Id) -> Result<Vec<ImageLink>, StoreError> {
        let state = self.inner.lock().await;
        let mut links: Vec<ImageLink> = state
            .links
            .iter()
            .filter(|l| l.item_id == item_id)
            .cloned()
            .collect();
        links.sort_by_key(|l| l.sort_order);
        Ok(links)
    }

    async fn insert_link(
        &self,
        item_id: Id,
        image_id: Id,
        kind: LinkKind,
        sort_order: i32,
    ) -> Result<ImageLink, StoreError> {
        let link = ImageLink {
            id: Id::now_v7(),
            item_id,
            image_id,
            kind,
            sort_order,
        };
        self.inner.lock().await.links.push(link.clone());
        Ok(link)
    }

    async fn set_link_order(&self, link_id: Id, sort_order: i32) -> Result<(), StoreError> {
        let mut state = self.inner.lock().await;
        let link = state
            .links
            .iter_mut()
            .find(|l| l.id == link_id)
            .ok_or(StoreError::NotFound {
                entity: "ImageLink",
                id: link_id,
            })?;
        link.sort_order = sort_order;
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.inner.lock().await.categories.clone())
    }

    async fn upsert_attribute_definition(
        &self,
        key: &str,
    ) -> Result<AttributeDefinition, StoreError> {
        let mut state = self.inner.lock().await;
        if let Some(def) = state
            .attribute_definitions
            .iter()
            .find(|d| d.key.eq_ignore_ascii_case(key))
        {
            return Ok(def.clone());
        }
        let def = AttributeDefinition {
            id: Id::now_v7(),
            key: key.to_string(),
        };
        state.attribute_definitions.push(def.clone());
        Ok(def)
    }

    async fn upsert_attribute_value(
        &self,
        definition_id: Id,
        value: &str,
    ) -> Result<AttributeValue, StoreError> {
        let mut state = self.inner.lock().await;
        if let Some(existing) = state
            .attribute_values
            .iter()
            .find(|v| v.definition_id == definition_id && v.value.eq_ignore_ascii_case(value))
        {
            return Ok(existing.clone());
        }
        let row = AttributeValue {
            id: Id::now_v7(),
            definition_id,
            value: value.to_string(),
        };
        state.attribute_values.push(row.clone());
        Ok(row)
    }

    async fn insert_entity_attribute(
        &self,
        row: NewEntityAttribute,
    ) -> Result<EntityAttribute, StoreError> {
        let record = EntityAttribute {
            id: Id::now_v7(),
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            definition_id: row.definition_id,
            value_id: row.value_id,
            raw_value: row.raw_value,
            confidence: row.confidence,
            source: row.source,
        };
        self.inner.lock().await.entity_attributes.push(record.clone());
        Ok(record)
    }

    async fn attributes_for_entity(
        &self,
        entity_type: &str,
        entity_id: Id,
    ) -> Result<Vec<EntityAttribute>, StoreError> {
        Ok(self
            .inner
            .lock()
            .await
            .entity_attributes
            .iter()
            .filter(|a| a.entity_type == entity_type && a.entity_id == entity_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OutfitStore for MemoryStore {
    async fn find_outfit(&self, outfit_id: Id) -> Result<Option<Outfit>, StoreError> {
        Ok(self.inner.lock().await.outfits.get(&outfit_id).cloned())
    }

    async fn append_render(&self, render: NewOutfitRender) -> Result<OutfitRender, StoreError> {
        let record = OutfitRender {
            id: Id::now_v7(),
            outfit_id: render.outfit_id,
            image_id: render.image_id,
            prompt: render.prompt,
            settings: render.settings,
            status: render.status,
            created_at: chrono::Utc::now(),
        };
        self.inner.lock().await.renders.push(record.clone());
        Ok(record)
    }

    async fn set_cover_image(&self, outfit_id: Id, image_id: Id) -> Result<(), StoreError> {
        let mut state = self.inner.lock().await;
        let outfit = state
            .outfits
            .get_mut(&outfit_id)
            .ok_or(StoreError::NotFound {
                entity: "Outfit",
                id: outfit_id,
            })?;
        outfit.cover_image_id = Some(image_id);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn pointers(&self, user_id: Id) -> Result<GenerationPointers, StoreError> {
        Ok(self
            .inner
            .lock()
            .await
            .pointers
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_current_headshot(&self, user_id: Id, image_id: Id) -> Result<(), StoreError> {
        let mut state = self.inner.lock().await;
        guard_image_owner(&state, user_id, image_id)?;
        state.pointers.entry(user_id).or_default().current_headshot_image_id = Some(image_id);
        Ok(())
    }

    async fn set_current_body_shot(&self, user_id: Id, image_id: Id) -> Result<(), StoreError> {
        let mut state = self.inner.lock().await;
        guard_image_owner(&state, user_id, image_id)?;
        state.pointers.entry(user_id).or_default().current_body_shot_image_id = Some(image_id);
        Ok(())
    }
}

/// Ownership guard for pointer writes: the image must exist and belong to
/// the acting user.
fn guard_image_owner(state: &State, user_id: Id, image_id: Id) -> Result<(), StoreError> {
    let image = state.images.get(&image_id).ok_or(StoreError::NotFound {
        entity: "Image",
        id: image_id,
    })?;
    if image.owner_id != user_id {
        tracing::warn!(%user_id, %image_id, "Rejected pointer write to foreign image");
        return Err(StoreError::Forbidden(format!(
            "image {image_id} does not belong to user {user_id}"
        )));
    }
    Ok(())
}
