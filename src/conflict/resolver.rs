//! Schedule validation and bounded iterative repair.
//!
//! # Algorithm
//!
//! 1. Clone the input assignments (the caller's set is never touched).
//! 2. Validate; if conflict-free, stop.
//! 3. Sort conflicts by priority descending (teacher > classroom >
//!    student > resource) and repair the first resolvable one.
//! 4. Revalidate and repeat, at most 10 iterations; stop early when a
//!    full pass repairs nothing.
//!
//! Repair is best-effort and bounded: unresolved conflicts are always
//! present in the returned list, never dropped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::conflict::detector::check_conflicts;
use crate::models::{
    Classroom, ConflictKind, ConflictRecord, CourseOffering, ScheduleAssignment, TimeSlot,
};

/// Repair-loop iteration bound.
const MAX_ITERATIONS: usize = 10;

/// Outcome of validating a whole schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the schedule is conflict-free.
    pub success: bool,
    /// Every pairwise conflict found.
    pub conflicts: Vec<ConflictRecord>,
}

/// Repair metrics for an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationStatistics {
    /// Conflicts repaired.
    pub resolved_count: usize,
    /// Conflicts left after the loop.
    pub remaining_conflicts: usize,
    /// `resolved / original * 100`; 100 when there was nothing to repair.
    pub optimization_rate: f64,
}

/// Outcome of an optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeResult {
    /// Whether the repaired schedule is conflict-free.
    pub success: bool,
    /// Summary message.
    pub message: String,
    /// The (possibly partially) repaired assignments.
    pub assignments: Vec<ScheduleAssignment>,
    /// Conflicts that could not be repaired.
    pub conflicts: Vec<ConflictRecord>,
    /// Repair metrics.
    pub statistics: OptimizationStatistics,
}

/// Validates a schedule by checking every unordered assignment pair.
///
/// `success` is true iff no pair conflicts. Pure: two calls on an
/// unmodified list return identical reports.
pub fn validate_schedule(assignments: &[ScheduleAssignment]) -> ValidationReport {
    let mut conflicts = Vec::new();

    for i in 0..assignments.len() {
        for j in (i + 1)..assignments.len() {
            conflicts.extend(check_conflicts(
                &assignments[i],
                std::slice::from_ref(&assignments[j]),
            ));
        }
    }

    ValidationReport {
        success: conflicts.is_empty(),
        conflicts,
    }
}

/// Priority-driven conflict repair over a fixed resource pool.
#[derive(Debug, Clone)]
pub struct ConflictResolver<'a> {
    classrooms: &'a [Classroom],
    time_slots: &'a [TimeSlot],
    courses: HashMap<i64, CourseOffering>,
}

impl<'a> ConflictResolver<'a> {
    /// Creates a resolver over the available rooms, slots, and course
    /// catalog.
    pub fn new(
        classrooms: &'a [Classroom],
        time_slots: &'a [TimeSlot],
        courses: impl IntoIterator<Item = CourseOffering>,
    ) -> Self {
        Self {
            classrooms,
            time_slots,
            courses: courses.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Runs the bounded repair loop on a cloned copy of `assignments`.
    pub fn optimize(&self, assignments: &[ScheduleAssignment]) -> OptimizeResult {
        let mut optimized = assignments.to_vec();

        let initial = validate_schedule(&optimized);
        let original_count = initial.conflicts.len();

        if initial.success {
            info!("schedule has no conflicts, nothing to repair");
            return OptimizeResult {
                success: true,
                message: "schedule is already conflict-free".into(),
                assignments: optimized,
                conflicts: Vec::new(),
                statistics: OptimizationStatistics {
                    resolved_count: 0,
                    remaining_conflicts: 0,
                    optimization_rate: 100.0,
                },
            };
        }

        info!(conflicts = original_count, "starting schedule repair");

        let mut conflicts = initial.conflicts;
        let mut resolved = 0usize;
        let mut iteration = 0usize;

        while !conflicts.is_empty() && iteration < MAX_ITERATIONS {
            iteration += 1;
            debug!(iteration, remaining = conflicts.len(), "repair iteration");

            // Stable sort keeps detection order among equal priorities
            conflicts.sort_by(|a, b| b.priority().cmp(&a.priority()));

            let mut progressed = false;
            for conflict in &conflicts {
                if self.resolve_conflict(conflict, &mut optimized) {
                    resolved += 1;
                    progressed = true;
                    debug!(
                        kind = ?conflict.kind,
                        course1 = conflict.course1,
                        course2 = ?conflict.course2,
                        "conflict repaired"
                    );
                    break;
                }
            }

            if !progressed {
                warn!(iteration, "no conflict could be repaired, stopping");
                break;
            }

            conflicts = validate_schedule(&optimized).conflicts;
        }

        let remaining = conflicts.len();
        // Repairing one conflict can surface a lower-priority one that was
        // masked at detection time, so cap the rate at 100.
        let optimization_rate = if original_count > 0 {
            (resolved as f64 / original_count as f64 * 100.0).min(100.0)
        } else {
            100.0
        };
        let message =
            format!("optimization complete: {resolved} repaired, {remaining} remaining");
        info!(resolved, remaining, "schedule repair finished");

        OptimizeResult {
            success: remaining == 0,
            message,
            assignments: optimized,
            conflicts,
            statistics: OptimizationStatistics {
                resolved_count: resolved,
                remaining_conflicts: remaining,
                optimization_rate,
            },
        }
    }

    /// Dispatches one conflict to its repair strategy. Only the pairwise
    /// kinds are repairable.
    fn resolve_conflict(
        &self,
        conflict: &ConflictRecord,
        schedules: &mut [ScheduleAssignment],
    ) -> bool {
        let Some(course2) = conflict.course2 else {
            return false;
        };
        let Some(idx1) = schedules.iter().position(|a| a.course_id == conflict.course1) else {
            return false;
        };
        let Some(idx2) = schedules.iter().position(|a| a.course_id == course2) else {
            return false;
        };

        let target = Self::pick_reschedule_target(schedules, idx1, idx2);

        match conflict.kind {
            ConflictKind::Teacher | ConflictKind::Student => self.resolve_by_time(schedules, target),
            ConflictKind::Classroom => {
                self.resolve_by_classroom(schedules, target) || self.resolve_by_time(schedules, target)
            }
            _ => false,
        }
    }

    /// The course added later (larger id) gives up its placement.
    fn pick_reschedule_target(
        schedules: &[ScheduleAssignment],
        idx1: usize,
        idx2: usize,
    ) -> usize {
        if schedules[idx1].course_id > schedules[idx2].course_id {
            idx1
        } else {
            idx2
        }
    }

    /// Moves the target to the first slot that produces no new collision
    /// against the rest of the set. Mutates slot id and clock interval
    /// in place.
    fn resolve_by_time(&self, schedules: &mut [ScheduleAssignment], target: usize) -> bool {
        for slot in self.time_slots {
            if Self::can_move_to_slot(schedules, target, slot) {
                let assignment = &mut schedules[target];
                assignment.time_slot_id = slot.id;
                assignment.start_min = slot.start_min;
                assignment.end_min = slot.end_min;
                debug!(
                    course = assignment.course_id,
                    slot = slot.id,
                    "moved session to a free slot"
                );
                return true;
            }
        }
        false
    }

    fn can_move_to_slot(
        schedules: &[ScheduleAssignment],
        target: usize,
        slot: &TimeSlot,
    ) -> bool {
        let mut trial = schedules[target].clone();
        trial.time_slot_id = slot.id;
        trial.start_min = slot.start_min;
        trial.end_min = slot.end_min;

        schedules
            .iter()
            .filter(|other| other.course_id != trial.course_id)
            .all(|other| !trial.collides_with(other))
    }

    /// Moves the target into an alternate room with adequate capacity and
    /// no room/slot clash.
    fn resolve_by_classroom(&self, schedules: &mut [ScheduleAssignment], target: usize) -> bool {
        let target_course = schedules[target].course_id;
        let target_slot = schedules[target].time_slot_id;
        let max_students = self
            .courses
            .get(&target_course)
            .and_then(|c| c.max_students);

        for room in self.classrooms {
            if max_students.is_some_and(|max| max > room.capacity) {
                continue;
            }

            let clash = schedules.iter().any(|other| {
                other.course_id != target_course
                    && other.classroom_id == room.id
                    && other.time_slot_id == target_slot
            });
            if clash {
                continue;
            }

            schedules[target].classroom_id = room.id;
            debug!(
                course = target_course,
                classroom = room.id,
                "moved session to an alternate room"
            );
            return true;
        }

        false
    }
}
