//! In-process event bus backed by a `tokio::sync::broadcast` channel.

use attire_core::{Id, Timestamp};
use attire_store::models::JobKind;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default broadcast capacity. Slow subscribers that fall more than this
/// many events behind start receiving `Lagged` errors rather than stalling
/// publishers.
const DEFAULT_CAPACITY: usize = 256;

/// How a job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOutcome {
    Succeeded,
    Failed,
}

/// A job-state change notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEvent {
    pub job_id: Id,
    pub kind: JobKind,
    pub owner_id: Id,
    /// `None` while the job is merely claimed; set on the terminal write.
    pub outcome: Option<JobOutcome>,
    /// Present only for failed jobs.
    pub error: Option<String>,
    pub timestamp: Timestamp,
}

impl JobEvent {
    /// Event for a successful claim (`-> Running`).
    pub fn claimed(job_id: Id, kind: JobKind, owner_id: Id) -> Self {
        Self {
            job_id,
            kind,
            owner_id,
            outcome: None,
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Event for a terminal `Succeeded` write.
    pub fn succeeded(job_id: Id, kind: JobKind, owner_id: Id) -> Self {
        Self {
            outcome: Some(JobOutcome::Succeeded),
            ..Self::claimed(job_id, kind, owner_id)
        }
    }

    /// Event for a terminal `Failed` write.
    pub fn failed(job_id: Id, kind: JobKind, owner_id: Id, error: impl Into<String>) -> Self {
        Self {
            outcome: Some(JobOutcome::Failed),
            error: Some(error.into()),
            ..Self::claimed(job_id, kind, owner_id)
        }
    }
}

/// Publish/subscribe hub for [`JobEvent`]s. Designed to be shared via
/// `Arc<EventBus>` across the application.
pub struct EventBus {
    sender: broadcast::Sender<JobEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event. Returns the number of active subscribers; an
    /// event published with no subscribers is simply dropped.
    pub fn publish(&self, event: JobEvent) -> usize {
        let subscribers = self.sender.send(event).unwrap_or(0);
        tracing::trace!(subscribers, "Published job event");
        subscribers
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        let job_id = Id::new_v4();
        bus.publish(JobEvent::succeeded(job_id, JobKind::Tag, Id::new_v4()));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.job_id, job_id);
        assert_eq!(event.outcome, Some(JobOutcome::Succeeded));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_dropped() {
        let bus = EventBus::new();
        let delivered = bus.publish(JobEvent::claimed(Id::new_v4(), JobKind::Tag, Id::new_v4()));
        assert_eq!(delivered, 0);
    }
}
