//! Job-state change notifications.
//!
//! [`EventBus`] is the in-process publish/subscribe hub external
//! collaborators (UI backends, billing, audit) listen on. The dispatcher
//! publishes a [`JobEvent`] on every claim and terminal write.

pub mod bus;

pub use bus::{EventBus, JobEvent, JobOutcome};
