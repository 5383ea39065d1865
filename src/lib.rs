//! Automatic course-timetabling engine.
//!
//! Assigns course offerings to (classroom, time-slot) pairs subject to
//! hard constraints (no teacher, classroom, or student double-booking)
//! while ranking candidates on soft constraints (room fit, time-of-day
//! preference, workload balance, continuity). Placement failures and
//! repairs are data, not errors: batches degrade gracefully and partial
//! schedules keep their value.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `CourseOffering`, `Classroom`,
//!   `TimeSlot`, `ScheduleAssignment`, `ConflictRecord`
//! - **`providers`**: Collaborator traits (resource lookup, schedule
//!   store, enrollment counts) plus in-memory implementations
//! - **`scoring`**: Pure compatibility scores, the composite quality
//!   score, and the pluggable course policy
//! - **`conflict`**: Pairwise and extended conflict classification,
//!   whole-schedule validation, bounded priority-driven repair
//! - **`scheduler`**: The greedy matcher, batch entry point, and
//!   statistics reporting
//!
//! # Concurrency
//!
//! Single-threaded and synchronous per request. Existing assignments are
//! read once per call and not re-validated transactionally: callers must
//! serialize requests per (semester, academic year) or wrap calls in an
//! external lock. Accepted assignments are persisted as one atomic batch
//! after the algorithm completes.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Lewis (2008), "A Survey of Metaheuristic-Based Techniques for
//!   University Timetabling Problems"

pub mod conflict;
pub mod error;
pub mod models;
pub mod providers;
pub mod scheduler;
pub mod scoring;

pub use conflict::{check_conflicts, validate_schedule, ConflictResolver, OptimizeResult};
pub use error::ScheduleError;
pub use scheduler::{AutoScheduler, ScheduleRequest, ScheduleResult};
