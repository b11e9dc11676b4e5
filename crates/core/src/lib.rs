//! Shared types and pure decision logic for the attire generation platform.
//!
//! Everything in this crate is side-effect free: ID/timestamp aliases, the
//! workflow selector for outfit composition, canonical category matching,
//! and prompt template construction. Higher layers (store, gateway, jobs)
//! depend on this crate; it depends on no other workspace crate.

pub mod category;
pub mod prompts;
pub mod types;
pub mod workflow;

pub use types::{Id, Timestamp};
pub use workflow::{select_workflow, CompositionStrategy};
