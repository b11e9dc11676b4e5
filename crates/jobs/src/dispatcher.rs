//! Job dispatcher: claim, route, persist exactly one terminal outcome.

use attire_core::Id;
use attire_events::JobEvent;
use attire_store::models::{Job, JobKind};

use crate::context::JobContext;
use crate::error::{DispatchError, ProcessorError};
use crate::processors;

/// Executes jobs on behalf of their owners. Each call is an independent,
/// short-lived unit of work; concurrency is bounded only by the claim CAS
/// on the job's status.
pub struct Dispatcher {
    ctx: JobContext,
}

impl Dispatcher {
    pub fn new(ctx: JobContext) -> Self {
        Self { ctx }
    }

    /// Execute a job for `caller_id`.
    ///
    /// Preconditions: the job exists and belongs to the caller (a foreign
    /// job reports [`DispatchError::NotFound`], never an auth failure) and
    /// is claimable. The claim is a single atomic conditional update in
    /// the job store; losing it yields [`DispatchError::Conflict`].
    ///
    /// Any processor failure is caught here and recorded as a terminal
    /// `Failed` write with a human-readable message. No automatic retry.
    pub async fn execute(
        &self,
        job_id: Id,
        caller_id: Id,
    ) -> Result<serde_json::Value, DispatchError> {
        if caller_id.is_nil() {
            return Err(DispatchError::Auth);
        }

        let job = self
            .ctx
            .jobs
            .find(job_id)
            .await
            .map_err(DispatchError::Store)?
            .ok_or(DispatchError::NotFound)?;
        if job.owner_id != caller_id {
            return Err(DispatchError::NotFound);
        }

        let Some(job) = self
            .ctx
            .jobs
            .try_claim(job_id)
            .await
            .map_err(DispatchError::Store)?
        else {
            return Err(DispatchError::Conflict);
        };

        tracing::info!(job_id = %job.id, kind = ?job.kind, owner_id = %job.owner_id, "Job claimed");
        self.ctx
            .events
            .publish(JobEvent::claimed(job.id, job.kind, job.owner_id));

        match self.run_processor(&job).await {
            Ok(result) => {
                self.ctx
                    .jobs
                    .complete(job.id, result.clone())
                    .await
                    .map_err(DispatchError::Store)?;
                self.ctx
                    .events
                    .publish(JobEvent::succeeded(job.id, job.kind, job.owner_id));
                tracing::info!(job_id = %job.id, "Job succeeded");
                Ok(result)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(
                    job_id = %job.id,
                    error = %message,
                    policy_block = e.is_policy_block(),
                    "Job failed",
                );
                if let Err(write_err) = self.ctx.jobs.fail(job.id, &message).await {
                    // The terminal write itself failed; surface the
                    // processor error anyway, it is the root cause.
                    tracing::error!(job_id = %job.id, error = %write_err, "Failed to record job failure");
                }
                self.ctx
                    .events
                    .publish(JobEvent::failed(job.id, job.kind, job.owner_id, message));
                Err(DispatchError::Processor(e))
            }
        }
    }

    async fn run_processor(&self, job: &Job) -> Result<serde_json::Value, ProcessorError> {
        match job.kind {
            JobKind::Tag => processors::tag::run(&self.ctx, job).await,
            JobKind::ProductShot => processors::product_shot::run(&self.ctx, job).await,
            JobKind::HeadshotGenerate => processors::headshot::run(&self.ctx, job).await,
            JobKind::BodyShotGenerate => processors::body_shot::run(&self.ctx, job).await,
            JobKind::OutfitRender => processors::outfit_render::run(&self.ctx, job).await,
        }
    }
}
