//! Greedy matching and batch statistics.
//!
//! `AutoScheduler` is the engine's entry point: it resolves resources
//! through the collaborator traits, runs the per-course greedy search,
//! persists accepted assignments as one batch, and reports statistics.
//!
//! # Algorithm
//!
//! Score-ranked greedy placement with comprehensive conflict checking;
//! see the module docs in `auto` for the full walk-through.
//!
//! # Reference
//!
//! Schaerf (1999), "A Survey of Automated Timetabling"

mod auto;
mod stats;

pub use auto::{AutoScheduler, ScheduleRequest, ScheduleResult};
pub use stats::ScheduleStatistics;
