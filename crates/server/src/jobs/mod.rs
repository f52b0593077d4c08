// crates/server/src/jobs/mod.rs
//! Background job system for analysis report generation.
//!
//! Provides:
//! - `JobTracker`: submit/poll/collect surface owned by `AppState`
//! - `JobRegistry`: synchronized in-memory store of job records
//! - the per-job background worker driving generation and rendering
//! - job types (`JobId`, `JobStatus`, `JobSnapshot`, `JobError`)

pub mod registry;
pub mod tracker;
pub mod types;
pub(crate) mod worker;

pub use registry::JobRegistry;
pub use tracker::JobTracker;
pub use types::{JobError, JobId, JobSnapshot, JobStatus};
