//! Batch statistics.
//!
//! Pure aggregation over a scheduling outcome: course counts, per-kind
//! conflict counts, and the success rate. Nothing here mutates state.

use serde::{Deserialize, Serialize};

use crate::models::{ConflictKind, ConflictRecord};

/// Aggregate counts and rates for a scheduling batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStatistics {
    /// Courses the batch attempted to place.
    pub total_courses: usize,
    /// Courses that received an assignment.
    pub scheduled_courses: usize,
    /// Courses left without an assignment.
    pub unscheduled_courses: usize,
    /// Conflicts recorded across the batch.
    pub total_conflicts: usize,
    /// Teacher double-bookings.
    pub teacher_conflicts: usize,
    /// Classroom double-bookings.
    pub classroom_conflicts: usize,
    /// Student cohort overlaps.
    pub student_conflicts: usize,
    /// Resource contention and placement failures.
    pub resource_conflicts: usize,
    /// Missing-prerequisite conflicts.
    pub dependency_conflicts: usize,
    /// Session spacing problems.
    pub continuity_conflicts: usize,
    /// Teacher/student load problems.
    pub workload_conflicts: usize,
    /// `scheduled / total * 100`; 0 when the batch was empty.
    pub success_rate: f64,
}

impl ScheduleStatistics {
    /// Aggregates a batch outcome.
    pub fn from_batch(
        total_courses: usize,
        scheduled_courses: usize,
        conflicts: &[ConflictRecord],
    ) -> Self {
        let count = |kind: ConflictKind| conflicts.iter().filter(|c| c.kind == kind).count();

        let success_rate = if total_courses > 0 {
            scheduled_courses as f64 / total_courses as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_courses,
            scheduled_courses,
            unscheduled_courses: total_courses.saturating_sub(scheduled_courses),
            total_conflicts: conflicts.len(),
            teacher_conflicts: count(ConflictKind::Teacher),
            classroom_conflicts: count(ConflictKind::Classroom),
            student_conflicts: count(ConflictKind::Student),
            resource_conflicts: count(ConflictKind::Resource),
            dependency_conflicts: count(ConflictKind::Dependency),
            continuity_conflicts: count(ConflictKind::Continuity),
            workload_conflicts: count(ConflictKind::Workload),
            success_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConflictRecord;

    #[test]
    fn test_from_batch_counts_and_rate() {
        let conflicts = vec![
            ConflictRecord::teacher(1, 2, 7),
            ConflictRecord::student(3, 4),
            ConflictRecord::new(ConflictKind::Resource, 5, "no fit", "widen slots"),
        ];
        let stats = ScheduleStatistics::from_batch(4, 3, &conflicts);

        assert_eq!(stats.total_courses, 4);
        assert_eq!(stats.scheduled_courses, 3);
        assert_eq!(stats.unscheduled_courses, 1);
        assert_eq!(stats.total_conflicts, 3);
        assert_eq!(stats.teacher_conflicts, 1);
        assert_eq!(stats.student_conflicts, 1);
        assert_eq!(stats.resource_conflicts, 1);
        assert_eq!(stats.classroom_conflicts, 0);
        assert_eq!(stats.success_rate, 75.0);
    }

    #[test]
    fn test_empty_batch_rate_is_zero() {
        let stats = ScheduleStatistics::from_batch(0, 0, &[]);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.unscheduled_courses, 0);
    }

    #[test]
    fn test_scheduled_never_drives_unscheduled_negative() {
        // More placements than requested courses (e.g. statistics over a
        // store that already held assignments) must not underflow.
        let stats = ScheduleStatistics::from_batch(1, 3, &[]);
        assert_eq!(stats.unscheduled_courses, 0);
    }
}
