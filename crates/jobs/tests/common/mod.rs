//! Shared fixtures for the pipeline integration tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use attire_core::Id;
use attire_events::EventBus;
use attire_gateway::{
    GatewayError, GenerateRequest, GenerativeModel, ModelOutput, ResponseModality,
};
use attire_jobs::{JobContext, PipelineConfig};
use attire_store::models::{Category, ImageSource, Item, Subcategory};
use attire_store::{MediaStore, MemoryStore};
use tokio::sync::Mutex;

/// One observed gateway call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub image_count: usize,
    pub modality: ResponseModality,
}

/// Scripted [`GenerativeModel`]: pops queued outputs in order and records
/// every request. An empty queue yields a default PNG payload so
/// image-only flows do not need explicit scripting.
#[derive(Default)]
pub struct ScriptedModel {
    outputs: Mutex<VecDeque<Result<ModelOutput, GatewayError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn push_text(&self, text: &str) {
        self.outputs
            .lock()
            .await
            .push_back(Ok(ModelOutput::Text(text.to_string())));
    }

    pub async fn push_image(&self, bytes: Vec<u8>) {
        self.outputs.lock().await.push_back(Ok(ModelOutput::Image {
            bytes,
            mime_type: "image/png".to_string(),
        }));
    }

    pub async fn push_err(&self, err: GatewayError) {
        self.outputs.lock().await.push_back(Err(err));
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, request: GenerateRequest) -> Result<ModelOutput, GatewayError> {
        self.calls.lock().await.push(RecordedCall {
            prompt: request.prompt.clone(),
            image_count: request.images.len(),
            modality: request.modality,
        });
        match self.outputs.lock().await.pop_front() {
            Some(result) => result,
            None => Ok(ModelOutput::Image {
                bytes: vec![0xAB, 0xCD],
                mime_type: "image/png".to_string(),
            }),
        }
    }
}

/// Wire a context over one shared memory store and a scripted model.
pub fn context(store: &MemoryStore, model: Arc<ScriptedModel>) -> JobContext {
    JobContext {
        jobs: Arc::new(store.clone()),
        media: Arc::new(store.clone()),
        items: Arc::new(store.clone()),
        outfits: Arc::new(store.clone()),
        profiles: Arc::new(store.clone()),
        model,
        events: Arc::new(EventBus::new()),
        config: PipelineConfig::default(),
    }
}

/// Upload a small placeholder image owned by `owner`.
pub async fn upload_image(store: &MemoryStore, owner: Id) -> Id {
    store
        .upload(owner, vec![1, 2, 3, 4], "image/jpeg", ImageSource::Upload)
        .await
        .unwrap()
        .id
}

/// Seed a bare item owned by `owner`.
pub async fn seed_item(store: &MemoryStore, owner: Id) -> Id {
    let item = Item {
        id: Id::new_v4(),
        owner_id: owner,
        title: None,
        description: None,
        category_id: None,
        subcategory_id: None,
        primary_color: None,
    };
    store.seed_item(item.clone()).await;
    item.id
}

/// Seed the canonical category list with "Tops" (subcategory "T-Shirts")
/// and "Bottoms". Returns the Tops id.
pub async fn seed_tops_category(store: &MemoryStore) -> Id {
    let tops_id = Id::new_v4();
    store
        .seed_categories(vec![
            Category {
                id: tops_id,
                name: "Tops".to_string(),
                subcategories: vec![Subcategory {
                    id: Id::new_v4(),
                    name: "T-Shirts".to_string(),
                }],
            },
            Category {
                id: Id::new_v4(),
                name: "Bottoms".to_string(),
                subcategories: vec![],
            },
        ])
        .await;
    tops_id
}
