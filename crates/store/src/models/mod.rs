//! Entity structs shared across the workspace.

pub mod attribute;
pub mod image;
pub mod item;
pub mod job;
pub mod outfit;
pub mod profile;

pub use attribute::{
    AttributeDefinition, AttributeSource, AttributeValue, EntityAttribute, NewEntityAttribute,
};
pub use image::{Image, ImagePayload, ImageSource};
pub use item::{Category, ImageLink, Item, ItemPatch, LinkKind, Subcategory};
pub use job::{Job, JobKind, JobStatus, SubmitJob};
pub use outfit::{NewOutfitRender, Outfit, OutfitRender, RenderStatus};
pub use profile::GenerationPointers;
