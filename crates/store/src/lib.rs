//! Store seams and data models for the attire generation platform.
//!
//! Persistence is owned by external collaborators; this crate defines the
//! contract the job pipeline writes through:
//!
//! - [`models`]: the entity structs shared across the workspace.
//! - [`traits`]: the five store seams ([`JobStore`], [`MediaStore`],
//!   [`ItemStore`], [`OutfitStore`], [`ProfileStore`]).
//! - [`MemoryStore`]: a complete in-process implementation backing tests
//!   and local development. Its job claim is a genuine atomic
//!   compare-and-swap, so concurrency properties hold under it.

pub mod error;
pub mod memory;
pub mod models;
pub mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use traits::{ItemStore, JobStore, MediaStore, OutfitStore, ProfileStore};
