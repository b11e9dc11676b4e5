use attire_gateway::GatewayError;
use attire_store::StoreError;

/// Failures inside a processor run. All of these end the job with a
/// terminal `Failed` write; the variant is preserved so policy blocks
/// (safety / refusal) stay distinguishable from technical failures at the
/// caller. Blocked generations must not be billed.
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    /// Required processor input is missing or unusable (e.g. no body-shot
    /// pointer for an outfit render).
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProcessorError {
    /// Whether this failure is an upstream policy block (not billable).
    pub fn is_policy_block(&self) -> bool {
        matches!(self, ProcessorError::Gateway(g) if g.is_policy_block())
    }
}

/// Outcome of [`Dispatcher::execute`](crate::Dispatcher::execute).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Missing or invalid caller identity.
    #[error("Unauthorized: missing caller identity")]
    Auth,

    /// The job does not exist, or exists but belongs to someone else.
    /// Foreign jobs deliberately report as not found rather than as an
    /// authorization failure, so callers cannot probe for job existence.
    #[error("Job not found")]
    NotFound,

    /// The job is already running (or a racing caller claimed it first),
    /// or has already succeeded.
    #[error("Job is already running or finished")]
    Conflict,

    /// The processor failed; the job has been marked `Failed` with a
    /// human-readable error.
    #[error("Job failed: {0}")]
    Processor(#[from] ProcessorError),

    /// The job store itself failed outside a processor run.
    #[error("Job store error: {0}")]
    Store(StoreError),
}
