//! Conflict detection and repair.
//!
//! `detector` classifies clashes between a candidate assignment and the
//! existing schedule: the base pairwise checks (teacher, classroom,
//! student) plus the extended checks (dependency, resource, continuity,
//! workload). `resolver` validates whole schedules and runs the bounded
//! priority-driven repair loop.

pub mod detector;
pub mod resolver;

pub use detector::{check_conflicts, ConflictDetector};
pub use resolver::{
    validate_schedule, ConflictResolver, OptimizationStatistics, OptimizeResult, ValidationReport,
};
