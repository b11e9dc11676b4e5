//! Driver for the polling state machine.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use attire_core::Id;
use attire_store::models::{Job, JobStatus};
use attire_store::JobStore;
use tokio::sync::{watch, Mutex};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::state::{transition, PollEvent, PollPhase};

/// Two-tier timeout configuration.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Cadence of job reads while polling.
    pub poll_interval: Duration,
    /// Budget for the job poll before degrading to fallback.
    pub short_timeout: Duration,
    /// Cadence of entity probes in fallback mode (slower than polling).
    pub fallback_interval: Duration,
    /// Budget for fallback mode before giving up silently. Roughly double
    /// the short timeout.
    pub fallback_timeout: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            short_timeout: Duration::from_secs(75),
            fallback_interval: Duration::from_secs(5),
            fallback_timeout: Duration::from_secs(150),
        }
    }
}

/// How a watch ended when it ended silently or terminally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded,
    Failed,
    /// Fallback refresh found completion evidence on the owning entity.
    Resolved,
    /// Fallback refresh exhausted its budget. Not an error: the job may
    /// still complete server-side.
    GaveUp,
}

/// Consumer callbacks. `on_update` fires on every successful job read,
/// *before* the terminal check, so partial payloads on an in-progress job
/// are surfaced. `on_complete` fires exactly once, only when a terminal
/// status was observed directly. `on_settled` fires for the silent fallback
/// endings (`Resolved` / `GaveUp`).
pub trait PollObserver: Send + Sync {
    fn on_update(&self, _job: &Job) {}
    fn on_complete(&self, _job: &Job) {}
    fn on_settled(&self, _outcome: PollOutcome) {}
}

/// Cache-bypassing read of the owning entity in fallback mode.
#[async_trait]
pub trait EntityProbe: Send + Sync {
    /// Re-read the owning entity and report whether completion evidence
    /// is visible (e.g. a product-shot link appeared on the item).
    async fn completion_evidence(&self) -> bool;
}

struct ActivePoll {
    job_id: Id,
    cancel: CancellationToken,
    handle: tokio::task::JoinHandle<()>,
}

/// One polling slot. At most one driver task is alive per poller: starting
/// a different job cancels the current task first, and restarting the same
/// job while it is still being watched is a no-op.
pub struct JobPoller {
    jobs: Arc<dyn JobStore>,
    config: PollerConfig,
    slot: Mutex<Option<ActivePoll>>,
    phase_tx: watch::Sender<PollPhase>,
}

impl JobPoller {
    pub fn new(jobs: Arc<dyn JobStore>, config: PollerConfig) -> Self {
        let (phase_tx, _) = watch::channel(PollPhase::Idle);
        Self {
            jobs,
            config,
            slot: Mutex::new(None),
            phase_tx,
        }
    }

    /// Current phase of the slot.
    pub fn phase(&self) -> PollPhase {
        *self.phase_tx.borrow()
    }

    /// Watch phase changes (test and UI support).
    pub fn subscribe_phase(&self) -> watch::Receiver<PollPhase> {
        self.phase_tx.subscribe()
    }

    /// The job currently being watched, if any.
    pub async fn active_job(&self) -> Option<Id> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .filter(|active| !active.handle.is_finished())
            .map(|active| active.job_id)
    }

    /// Start watching `job_id`.
    ///
    /// Idempotent while a poll for the same job is active. A different job
    /// id stops the current poll before starting the new one, so a slot
    /// never owns two timers.
    pub async fn start_polling(
        &self,
        job_id: Id,
        observer: Arc<dyn PollObserver>,
        probe: Arc<dyn EntityProbe>,
    ) {
        let mut slot = self.slot.lock().await;

        if let Some(active) = slot.as_ref() {
            if active.job_id == job_id && !active.handle.is_finished() {
                tracing::debug!(%job_id, "Poll already active, ignoring duplicate start");
                return;
            }
        }
        if let Some(active) = slot.take() {
            tracing::debug!(old_job_id = %active.job_id, new_job_id = %job_id, "Replacing active poll");
            active.cancel.cancel();
            active.handle.abort();
        }

        let cancel = CancellationToken::new();
        let driver = Driver {
            jobs: self.jobs.clone(),
            config: self.config.clone(),
            job_id,
            observer,
            probe,
            cancel: cancel.clone(),
            phase_tx: self.phase_tx.clone(),
        };
        self.phase_tx
            .send_replace(transition(self.phase(), PollEvent::Started));
        let handle = tokio::spawn(driver.run());
        *slot = Some(ActivePoll {
            job_id,
            cancel,
            handle,
        });
    }

    /// Stop watching. Client-local: never cancels server-side execution;
    /// the job may still complete and mutate shared state afterward.
    pub async fn stop(&self) {
        let mut slot = self.slot.lock().await;
        if let Some(active) = slot.take() {
            tracing::debug!(job_id = %active.job_id, "Stopping poll (client-local)");
            active.cancel.cancel();
            active.handle.abort();
            self.phase_tx
                .send_replace(transition(self.phase(), PollEvent::Stopped));
        }
    }
}

/// State owned by one driver task. The driver is the single writer of the
/// slot's phase for its lifetime.
struct Driver {
    jobs: Arc<dyn JobStore>,
    config: PollerConfig,
    job_id: Id,
    observer: Arc<dyn PollObserver>,
    probe: Arc<dyn EntityProbe>,
    cancel: CancellationToken,
    phase_tx: watch::Sender<PollPhase>,
}

impl Driver {
    fn apply(&self, event: PollEvent) -> PollPhase {
        let next = transition(*self.phase_tx.borrow(), event);
        self.phase_tx.send_replace(next);
        next
    }

    async fn run(self) {
        match self.poll_job().await {
            PollLoopEnd::Terminal => {}
            PollLoopEnd::Cancelled => {}
            PollLoopEnd::Degrade(event) => {
                self.apply(event);
                self.apply(PollEvent::FallbackStarted);
                self.fallback_refresh().await;
            }
        }
    }

    /// Fast loop: read the job each tick until terminal, cancelled, errored,
    /// or past the short timeout.
    async fn poll_job(&self) -> PollLoopEnd {
        let deadline = Instant::now() + self.config.short_timeout;
        let mut ticks = interval(self.config.poll_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => return PollLoopEnd::Cancelled,
                _ = ticks.tick() => {}
            }
            if Instant::now() >= deadline {
                tracing::debug!(job_id = %self.job_id, "Job poll timed out, degrading to fallback");
                return PollLoopEnd::Degrade(PollEvent::ShortTimeout);
            }

            let job = match self.jobs.find(self.job_id).await {
                Ok(Some(job)) => job,
                Ok(None) => {
                    tracing::warn!(job_id = %self.job_id, "Watched job disappeared");
                    return PollLoopEnd::Degrade(PollEvent::ReadError);
                }
                Err(e) => {
                    tracing::warn!(job_id = %self.job_id, error = %e, "Job read failed");
                    return PollLoopEnd::Degrade(PollEvent::ReadError);
                }
            };

            // Partial payloads first, terminal check second.
            self.observer.on_update(&job);

            match job.status {
                JobStatus::Succeeded => {
                    self.apply(PollEvent::JobSucceeded);
                    self.observer.on_complete(&job);
                    return PollLoopEnd::Terminal;
                }
                JobStatus::Failed => {
                    self.apply(PollEvent::JobFailed);
                    self.observer.on_complete(&job);
                    return PollLoopEnd::Terminal;
                }
                JobStatus::Queued | JobStatus::Running => {}
            }
        }
    }

    /// Slow loop: probe the owning entity until evidence of completion
    /// appears or the fallback budget is exhausted. Both endings are
    /// silent; no error surfaces for a job that may still finish.
    async fn fallback_refresh(&self) {
        let deadline = Instant::now() + self.config.fallback_timeout;
        let mut ticks = interval(self.config.fallback_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The interval's first tick is immediate; skip it so the first
        // probe happens one slow interval after degrading.
        ticks.tick().await;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => return,
                _ = ticks.tick() => {}
            }
            if self.probe.completion_evidence().await {
                self.apply(PollEvent::EvidenceFound);
                self.observer.on_settled(PollOutcome::Resolved);
                return;
            }
            if Instant::now() >= deadline {
                tracing::debug!(job_id = %self.job_id, "Fallback refresh gave up");
                self.apply(PollEvent::FallbackTimeout);
                self.observer.on_settled(PollOutcome::GaveUp);
                return;
            }
        }
    }
}

enum PollLoopEnd {
    Terminal,
    Cancelled,
    Degrade(PollEvent),
}
