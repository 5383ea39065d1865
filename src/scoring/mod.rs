//! Compatibility scoring and quality evaluation.
//!
//! `compat` holds the pure scoring and gating functions the matcher uses
//! to rank and filter (classroom, time-slot) candidates; `quality` holds
//! the weighted composite score recorded for an accepted assignment and
//! the pluggable course policy (priority detection, teacher preference).
//!
//! All scoring functions are deterministic for identical inputs and
//! produce values in [0, 100].

pub mod compat;
pub mod quality;

pub use compat::{classroom_score, equipment_compatible, is_optimal_match, time_slot_score};
pub use quality::{quality_score, CoursePolicy, HeuristicPolicy};
