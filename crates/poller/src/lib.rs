//! Client-side job polling.
//!
//! A [`JobPoller`] watches one logical slot (e.g. "the product-shot job of
//! this wardrobe item") by reading the job store on a fixed cadence until
//! the job reaches a terminal status, surfacing partial payloads along the
//! way. When the poll itself errors or exceeds the short timeout, the
//! poller degrades to a fallback mode that watches the *owning entity* for
//! completion evidence instead, and finally gives up silently. The job may
//! still finish server-side after the client stops watching, and stopping a
//! poller never cancels execution.
//!
//! Transitions live in a pure function ([`state::transition`]); the driver
//! task is the single owner of its slot's phase, so duplicate timers are
//! structurally impossible.

pub mod poller;
pub mod state;

pub use poller::{EntityProbe, JobPoller, PollObserver, PollOutcome, PollerConfig};
pub use state::{transition, PollEvent, PollPhase};
