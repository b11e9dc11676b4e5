use attire_core::Id;

/// Failures surfaced by the store seams.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: Id },

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A guarded write rejected because the target does not belong to the
    /// acting user (e.g. pointing a generation pointer at a foreign image).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Backend-level failure (I/O, connectivity) from a real store.
    #[error("Store backend error: {0}")]
    Backend(String),
}
