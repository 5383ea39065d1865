//! Error types for provider and store boundaries.
//!
//! The scheduling API itself never surfaces these to callers:
//! `auto_schedule` and `optimize_schedule` convert any error into a
//! failed result with a message. Errors exist for the collaborator
//! traits, whose implementations may sit on a database or a network.

use thiserror::Error;

/// Failure at a collaborator boundary.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The request is structurally invalid (missing semester, empty course list).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A resource provider (courses, classrooms, time slots) failed.
    #[error("provider failure: {0}")]
    Provider(String),

    /// The schedule store failed to read or persist assignments.
    #[error("store failure: {0}")]
    Store(String),
}
