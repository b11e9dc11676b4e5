//! Asynchronous generation job pipeline: the dispatcher, the five
//! type-specific processors, and their typed input/result contracts.
//!
//! Flow: a caller invokes [`Dispatcher::execute`] with a job id and its
//! identity; the dispatcher claims the job (atomic status CAS), routes by
//! [`JobKind`](attire_store::models::JobKind) to the matching processor,
//! and persists exactly one terminal outcome. Processors talk to the
//! generation model through the gateway seam and write side effects
//! through the store seams. No automatic retry anywhere.

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod inputs;
pub mod processors;

pub use config::PipelineConfig;
pub use context::JobContext;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, ProcessorError};
