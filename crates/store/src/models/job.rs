//! Job entity model for the asynchronous generation pipeline.

use attire_core::{Id, Timestamp};
use serde::{Deserialize, Serialize};

/// The five generation job types the dispatcher routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Analyze a wardrobe item's photo into structured attributes.
    Tag,
    /// Transform an item photo into a square studio product shot.
    ProductShot,
    /// Stylize a selfie into the user's current headshot.
    HeadshotGenerate,
    /// Compose the user's current body shot from a body photo + headshot.
    BodyShotGenerate,
    /// Render a full outfit on the user's studio model.
    OutfitRender,
}

/// Job lifecycle status. Transitions are monotonic:
/// `Queued -> Running -> {Succeeded | Failed}`, with exactly one terminal
/// write. A `Failed` job may be re-claimed for another run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// Whether this status ends the job's lifecycle.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

/// A job record as read from the job store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Id,
    pub kind: JobKind,
    pub owner_id: Id,
    /// Type-specific input payload, decoded by the matching processor.
    pub input: serde_json::Value,
    pub status: JobStatus,
    /// Type-specific result payload; `None` until the job succeeds. A
    /// running job may carry a partial payload here (low-latency draft)
    /// that pollers surface before the terminal status.
    pub result: Option<serde_json::Value>,
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new queued job.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitJob {
    pub kind: JobKind,
    pub input: serde_json::Value,
}
