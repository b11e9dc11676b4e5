//! Driver tests under a paused clock.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use attire_core::Id;
use attire_poller::{EntityProbe, JobPoller, PollObserver, PollOutcome, PollPhase, PollerConfig};
use attire_store::models::{Job, JobKind, JobStatus, SubmitJob};
use attire_store::{JobStore, MemoryStore, StoreError};

// ---- test doubles ----

/// Records every observer callback in order.
#[derive(Default)]
struct Recorder {
    log: Mutex<Vec<String>>,
}

impl Recorder {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn count(&self, prefix: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .count()
    }
}

impl PollObserver for Recorder {
    fn on_update(&self, job: &Job) {
        self.log
            .lock()
            .unwrap()
            .push(format!("update:{:?}", job.status));
    }

    fn on_complete(&self, job: &Job) {
        self.log
            .lock()
            .unwrap()
            .push(format!("complete:{:?}", job.status));
    }

    fn on_settled(&self, outcome: PollOutcome) {
        self.log
            .lock()
            .unwrap()
            .push(format!("settled:{outcome:?}"));
    }
}

/// Entity probe answering from a script, then a fixed default.
struct ScriptedProbe {
    answers: Mutex<VecDeque<bool>>,
    default: bool,
}

impl ScriptedProbe {
    fn always(default: bool) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(VecDeque::new()),
            default,
        })
    }

    fn script(answers: &[bool], default: bool) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            default,
        })
    }
}

#[async_trait]
impl EntityProbe for ScriptedProbe {
    async fn completion_evidence(&self) -> bool {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default)
    }
}

/// Delegating job store that counts reads per job id.
struct CountingStore {
    inner: MemoryStore,
    finds: Mutex<std::collections::HashMap<Id, usize>>,
}

impl CountingStore {
    fn new(inner: MemoryStore) -> Arc<Self> {
        Arc::new(Self {
            inner,
            finds: Mutex::new(Default::default()),
        })
    }

    fn finds_for(&self, id: Id) -> usize {
        self.finds.lock().unwrap().get(&id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl JobStore for CountingStore {
    async fn submit(&self, owner_id: Id, job: SubmitJob) -> Result<Job, StoreError> {
        self.inner.submit(owner_id, job).await
    }

    async fn find(&self, id: Id) -> Result<Option<Job>, StoreError> {
        *self.finds.lock().unwrap().entry(id).or_insert(0) += 1;
        self.inner.find(id).await
    }

    async fn try_claim(&self, id: Id) -> Result<Option<Job>, StoreError> {
        self.inner.try_claim(id).await
    }

    async fn complete(&self, id: Id, result: serde_json::Value) -> Result<(), StoreError> {
        self.inner.complete(id, result).await
    }

    async fn fail(&self, id: Id, error: &str) -> Result<(), StoreError> {
        self.inner.fail(id, error).await
    }
}

/// Short budgets so tests advance through both tiers quickly.
fn test_config() -> PollerConfig {
    PollerConfig {
        poll_interval: Duration::from_secs(1),
        short_timeout: Duration::from_secs(4),
        fallback_interval: Duration::from_secs(1),
        fallback_timeout: Duration::from_secs(3),
    }
}

async fn running_job(store: &MemoryStore) -> Job {
    let owner = Id::new_v4();
    let job = store
        .submit(
            owner,
            SubmitJob {
                kind: JobKind::ProductShot,
                input: serde_json::json!({"image_ids": []}),
            },
        )
        .await
        .unwrap();
    store.try_claim(job.id).await.unwrap().unwrap()
}

/// Let the driver task run every timer that is currently due.
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

async fn advance(duration: Duration) {
    tokio::time::advance(duration).await;
    settle().await;
}

// ---- tests ----

#[tokio::test(start_paused = true)]
async fn updates_surface_before_the_terminal_callback() {
    let store = MemoryStore::default();
    let job = running_job(&store).await;
    let poller = JobPoller::new(Arc::new(store.clone()), test_config());
    let recorder = Recorder::new();

    poller
        .start_polling(job.id, recorder.clone(), ScriptedProbe::always(false))
        .await;
    settle().await;

    // The first read sees the job still running.
    assert_eq!(recorder.log(), vec!["update:Running"]);
    assert_eq!(poller.phase(), PollPhase::Polling);

    store
        .complete(job.id, serde_json::json!({"ok": true}))
        .await
        .unwrap();
    advance(Duration::from_secs(1)).await;

    assert_eq!(
        recorder.log(),
        vec!["update:Running", "update:Succeeded", "complete:Succeeded"]
    );
    assert_eq!(poller.phase(), PollPhase::Succeeded);
}

#[tokio::test(start_paused = true)]
async fn failed_jobs_complete_the_watch_too() {
    let store = MemoryStore::default();
    let job = running_job(&store).await;
    store.fail(job.id, "model refused").await.unwrap();

    let poller = JobPoller::new(Arc::new(store), test_config());
    let recorder = Recorder::new();
    poller
        .start_polling(job.id, recorder.clone(), ScriptedProbe::always(false))
        .await;
    settle().await;

    assert_eq!(recorder.log(), vec!["update:Failed", "complete:Failed"]);
    assert_eq!(poller.phase(), PollPhase::Failed);
}

#[tokio::test(start_paused = true)]
async fn terminal_callback_fires_exactly_once() {
    let store = MemoryStore::default();
    let job = running_job(&store).await;
    store.complete(job.id, serde_json::json!({})).await.unwrap();

    let poller = JobPoller::new(Arc::new(store), test_config());
    let recorder = Recorder::new();
    poller
        .start_polling(job.id, recorder.clone(), ScriptedProbe::always(false))
        .await;
    settle().await;
    // Time keeps passing after settlement; no more reads happen.
    advance(Duration::from_secs(10)).await;

    assert_eq!(recorder.count("complete:"), 1);
    assert_eq!(recorder.count("update:"), 1);
}

#[tokio::test(start_paused = true)]
async fn duplicate_start_for_the_same_job_keeps_one_timer() {
    let inner = MemoryStore::default();
    let job = running_job(&inner).await;
    let store = CountingStore::new(inner);
    let poller = JobPoller::new(store.clone(), test_config());
    let recorder = Recorder::new();

    poller
        .start_polling(job.id, recorder.clone(), ScriptedProbe::always(false))
        .await;
    poller
        .start_polling(job.id, recorder.clone(), ScriptedProbe::always(false))
        .await;
    settle().await;
    advance(Duration::from_secs(1)).await;

    // One timer: a read at t=0 and one at t=1, not two of each.
    assert_eq!(store.finds_for(job.id), 2);
    assert_eq!(poller.active_job().await, Some(job.id));
}

#[tokio::test(start_paused = true)]
async fn starting_a_different_job_replaces_the_active_watch() {
    let inner = MemoryStore::default();
    let first = running_job(&inner).await;
    let second = running_job(&inner).await;
    let store = CountingStore::new(inner);
    let poller = JobPoller::new(store.clone(), test_config());
    let recorder = Recorder::new();

    poller
        .start_polling(first.id, recorder.clone(), ScriptedProbe::always(false))
        .await;
    settle().await;
    poller
        .start_polling(second.id, recorder.clone(), ScriptedProbe::always(false))
        .await;
    settle().await;

    let first_reads = store.finds_for(first.id);
    for _ in 0..3 {
        advance(Duration::from_secs(1)).await;
    }

    // The first job's timer is gone; only the replacement keeps reading.
    assert_eq!(store.finds_for(first.id), first_reads);
    assert!(store.finds_for(second.id) >= 3);
    assert_eq!(poller.active_job().await, Some(second.id));
}

#[tokio::test(start_paused = true)]
async fn stop_is_client_local_and_returns_to_idle() {
    let store = MemoryStore::default();
    let job = running_job(&store).await;
    let poller = JobPoller::new(Arc::new(store.clone()), test_config());
    let recorder = Recorder::new();

    poller
        .start_polling(job.id, recorder.clone(), ScriptedProbe::always(false))
        .await;
    settle().await;
    poller.stop().await;
    settle().await;

    assert_eq!(poller.phase(), PollPhase::Idle);
    assert_eq!(poller.active_job().await, None);

    // Stopping the watch never touched the job itself.
    let job = store.find(job.id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Running);
}

#[tokio::test(start_paused = true)]
async fn short_timeout_degrades_to_entity_refresh_and_resolves() {
    let store = MemoryStore::default();
    let job = running_job(&store).await;
    let poller = JobPoller::new(Arc::new(store), test_config());
    let recorder = Recorder::new();
    // First probe sees nothing; the second finds the entity updated.
    let probe = ScriptedProbe::script(&[false], true);

    poller.start_polling(job.id, recorder.clone(), probe).await;
    settle().await;
    for _ in 0..5 {
        advance(Duration::from_secs(1)).await;
    }
    assert_eq!(poller.phase(), PollPhase::FallbackRefresh);

    advance(Duration::from_secs(1)).await;
    advance(Duration::from_secs(1)).await;

    assert_eq!(poller.phase(), PollPhase::Resolved);
    assert_eq!(recorder.count("settled:"), 1);
    assert!(recorder.log().contains(&"settled:Resolved".to_string()));
    assert_eq!(recorder.count("complete:"), 0);
}

#[tokio::test(start_paused = true)]
async fn fallback_timeout_gives_up_without_an_error() {
    let store = MemoryStore::default();
    let job = running_job(&store).await;
    let poller = JobPoller::new(Arc::new(store), test_config());
    let recorder = Recorder::new();

    poller
        .start_polling(job.id, recorder.clone(), ScriptedProbe::always(false))
        .await;
    settle().await;
    for _ in 0..12 {
        advance(Duration::from_secs(1)).await;
    }

    assert_eq!(poller.phase(), PollPhase::GaveUp);
    assert!(recorder.log().contains(&"settled:GaveUp".to_string()));
    assert_eq!(recorder.count("complete:"), 0);
}

#[tokio::test(start_paused = true)]
async fn read_errors_degrade_instead_of_failing_the_watch() {
    struct BrokenStore;

    #[async_trait]
    impl JobStore for BrokenStore {
        async fn submit(&self, _: Id, _: SubmitJob) -> Result<Job, StoreError> {
            Err(StoreError::Backend("unavailable".into()))
        }
        async fn find(&self, _: Id) -> Result<Option<Job>, StoreError> {
            Err(StoreError::Backend("unavailable".into()))
        }
        async fn try_claim(&self, _: Id) -> Result<Option<Job>, StoreError> {
            Err(StoreError::Backend("unavailable".into()))
        }
        async fn complete(&self, _: Id, _: serde_json::Value) -> Result<(), StoreError> {
            Err(StoreError::Backend("unavailable".into()))
        }
        async fn fail(&self, _: Id, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("unavailable".into()))
        }
    }

    let poller = JobPoller::new(Arc::new(BrokenStore), test_config());
    let recorder = Recorder::new();
    let probe = ScriptedProbe::always(true);

    poller.start_polling(Id::new_v4(), recorder.clone(), probe).await;
    settle().await;
    assert_eq!(poller.phase(), PollPhase::FallbackRefresh);

    advance(Duration::from_secs(1)).await;
    assert_eq!(poller.phase(), PollPhase::Resolved);
    assert!(recorder.log().contains(&"settled:Resolved".to_string()));
}
