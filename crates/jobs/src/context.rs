//! Shared dependencies handed to the dispatcher and processors.

use std::sync::Arc;

use attire_events::EventBus;
use attire_gateway::GenerativeModel;
use attire_store::{ItemStore, JobStore, MediaStore, OutfitStore, ProfileStore};

use crate::config::PipelineConfig;

/// Everything a processor needs: the store seams, the generation model,
/// the event bus, and the pipeline tunables. Clone-cheap (all `Arc`s).
#[derive(Clone)]
pub struct JobContext {
    pub jobs: Arc<dyn JobStore>,
    pub media: Arc<dyn MediaStore>,
    pub items: Arc<dyn ItemStore>,
    pub outfits: Arc<dyn OutfitStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub model: Arc<dyn GenerativeModel>,
    pub events: Arc<EventBus>,
    pub config: PipelineConfig,
}
