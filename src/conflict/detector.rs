//! Conflict classification.
//!
//! # Base checks
//! Two assignments colliding in time (same day, intersecting week ranges,
//! intersecting clock intervals) produce one conflict record, classified
//! by the highest-priority match: a Teacher conflict when they share a
//! teacher, else a Classroom conflict when they share a room, else a
//! Student conflict when they are different courses.
//!
//! The student check is intentionally coarse: any two distinct courses
//! in overlapping sessions count as a cohort clash, regardless of actual
//! roster overlap. Callers treat it as a known over-approximation.
//!
//! # Extended checks
//! The extended checks need course data (names, types, enrollment) for
//! the assignments involved, so they live on [`ConflictDetector`], which
//! carries a course index. An assignment whose course is missing from
//! the index is skipped by the checks that need it.

use std::collections::HashMap;

use crate::models::{ConflictKind, ConflictRecord, CourseOffering, ScheduleAssignment};

/// At most one lab section may occupy a slot (shared bench equipment).
const LAB_CONCURRENT_LIMIT: usize = 1;
/// Sports grounds support up to three concurrent sections.
const PE_CONCURRENT_LIMIT: usize = 3;
/// Daily session cap per teacher.
const TEACHER_DAILY_LIMIT: usize = 4;
/// Weekly session cap per teacher.
const TEACHER_WEEKLY_LIMIT: usize = 20;
/// Concurrent-section cap per (slot, day).
const SLOT_SECTION_LIMIT: usize = 5;
/// System-wide daily session cap.
const DAILY_SESSION_LIMIT: usize = 8;
/// Largest acceptable gap, in days, between sessions of one course.
const MAX_SESSION_GAP_DAYS: i32 = 3;

/// Base pairwise conflict check of a candidate against existing
/// assignments.
pub fn check_conflicts(
    candidate: &ScheduleAssignment,
    existing: &[ScheduleAssignment],
) -> Vec<ConflictRecord> {
    let mut conflicts = Vec::new();

    for other in existing {
        if !candidate.collides_with(other) {
            continue;
        }

        if candidate.teacher_id == other.teacher_id {
            conflicts.push(ConflictRecord::teacher(
                candidate.course_id,
                other.course_id,
                candidate.teacher_id,
            ));
        } else if candidate.classroom_id == other.classroom_id {
            conflicts.push(ConflictRecord::classroom(
                candidate.course_id,
                other.course_id,
                candidate.classroom_id,
            ));
        } else if candidate.course_id != other.course_id {
            conflicts.push(ConflictRecord::student(candidate.course_id, other.course_id));
        }
    }

    conflicts
}

/// Extended conflict detection over a course index.
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    courses: HashMap<i64, CourseOffering>,
}

impl ConflictDetector {
    /// Builds a detector over the given course catalog.
    pub fn new(courses: impl IntoIterator<Item = CourseOffering>) -> Self {
        Self {
            courses: courses.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    fn course(&self, id: i64) -> Option<&CourseOffering> {
        self.courses.get(&id)
    }

    fn course_is_type(&self, id: i64, labels: &[&str]) -> bool {
        self.course(id).is_some_and(|c| c.is_type(labels))
    }

    /// Base plus extended checks; the full gate the matcher runs before
    /// accepting a candidate.
    pub fn comprehensive_check(
        &self,
        candidate: &ScheduleAssignment,
        existing: &[ScheduleAssignment],
    ) -> Vec<ConflictRecord> {
        let mut conflicts = check_conflicts(candidate, existing);
        conflicts.extend(self.check_advanced_conflicts(candidate, existing));
        conflicts
    }

    /// Extended checks: dependency, specialized-resource contention,
    /// continuity, and teacher/student workload.
    pub fn check_advanced_conflicts(
        &self,
        candidate: &ScheduleAssignment,
        existing: &[ScheduleAssignment],
    ) -> Vec<ConflictRecord> {
        let mut conflicts = Vec::new();
        conflicts.extend(self.dependency_conflicts(candidate, existing));
        conflicts.extend(self.resource_conflicts(candidate, existing));
        conflicts.extend(self.continuity_conflicts(candidate, existing));
        conflicts.extend(self.teacher_workload_conflicts(candidate, existing));
        conflicts.extend(self.student_workload_conflicts(candidate, existing));
        conflicts
    }

    /// An "Advanced X" course requires a "Basic X" course already on the
    /// schedule.
    fn dependency_conflicts(
        &self,
        candidate: &ScheduleAssignment,
        existing: &[ScheduleAssignment],
    ) -> Vec<ConflictRecord> {
        let Some(course) = self.course(candidate.course_id) else {
            return Vec::new();
        };
        if !course.name.contains("Advanced") {
            return Vec::new();
        }

        let basic_name = course.name.replace("Advanced", "Basic");
        let has_basic = existing.iter().any(|a| {
            self.course(a.course_id)
                .is_some_and(|c| c.name == basic_name)
        });

        if has_basic {
            Vec::new()
        } else {
            vec![ConflictRecord::new(
                ConflictKind::Dependency,
                candidate.course_id,
                format!("prerequisite course not scheduled: {basic_name}"),
                "schedule the basic course first",
            )]
        }
    }

    /// Specialized-room contention: lab benches and sports grounds have
    /// small concurrent-use limits per slot.
    fn resource_conflicts(
        &self,
        candidate: &ScheduleAssignment,
        existing: &[ScheduleAssignment],
    ) -> Vec<ConflictRecord> {
        let mut conflicts = Vec::new();
        let Some(course) = self.course(candidate.course_id) else {
            return conflicts;
        };

        if course.is_type(&["lab"]) {
            let concurrent = existing
                .iter()
                .filter(|a| a.time_slot_id == candidate.time_slot_id)
                .filter(|a| self.course_is_type(a.course_id, &["lab"]))
                .count();
            if concurrent >= LAB_CONCURRENT_LIMIT {
                conflicts.push(ConflictRecord::new(
                    ConflictKind::Resource,
                    candidate.course_id,
                    "laboratory equipment contention in this slot",
                    "move the lab session or add laboratory capacity",
                ));
            }
        } else if course.is_type(&["physical", "pe"]) {
            let concurrent = existing
                .iter()
                .filter(|a| a.time_slot_id == candidate.time_slot_id)
                .filter(|a| self.course_is_type(a.course_id, &["physical", "pe"]))
                .count();
            if concurrent >= PE_CONCURRENT_LIMIT {
                conflicts.push(ConflictRecord::new(
                    ConflictKind::Resource,
                    candidate.course_id,
                    "sports grounds over capacity in this slot",
                    "move the session or use another field",
                ));
            }
        }

        conflicts
    }

    /// Sessions of one course should neither share a day nor sit more
    /// than three days apart.
    fn continuity_conflicts(
        &self,
        candidate: &ScheduleAssignment,
        existing: &[ScheduleAssignment],
    ) -> Vec<ConflictRecord> {
        let mut conflicts = Vec::new();

        for other in existing.iter().filter(|a| a.course_id == candidate.course_id) {
            let day_gap = (i32::from(candidate.day_of_week) - i32::from(other.day_of_week)).abs();

            if day_gap == 0 {
                conflicts.push(ConflictRecord::new(
                    ConflictKind::Continuity,
                    candidate.course_id,
                    "course meets twice on the same day",
                    "spread the sessions across the week",
                ));
            }

            if day_gap > MAX_SESSION_GAP_DAYS {
                conflicts.push(ConflictRecord::new(
                    ConflictKind::Continuity,
                    candidate.course_id,
                    "sessions are more than three days apart",
                    "shorten the gap between sessions",
                ));
            }
        }

        conflicts
    }

    /// Teacher load caps: at most 4 sessions a day and 20 a week.
    fn teacher_workload_conflicts(
        &self,
        candidate: &ScheduleAssignment,
        existing: &[ScheduleAssignment],
    ) -> Vec<ConflictRecord> {
        let mut conflicts = Vec::new();

        let same_day = existing
            .iter()
            .filter(|a| a.teacher_id == candidate.teacher_id)
            .filter(|a| a.day_of_week == candidate.day_of_week)
            .count();
        if same_day >= TEACHER_DAILY_LIMIT {
            conflicts.push(ConflictRecord::new(
                ConflictKind::Workload,
                candidate.course_id,
                format!("teacher daily load too high: {} sessions", same_day + 1),
                "move the session to another day or reassign it",
            ));
        }

        let weekly = existing
            .iter()
            .filter(|a| a.teacher_id == candidate.teacher_id)
            .count();
        if weekly >= TEACHER_WEEKLY_LIMIT {
            conflicts.push(ConflictRecord::new(
                ConflictKind::Workload,
                candidate.course_id,
                format!("teacher weekly load too high: {} sessions", weekly + 1),
                "assign another teacher or defer the course",
            ));
        }

        conflicts
    }

    /// Student load caps: at most 5 sections in one (slot, day) and 8
    /// sessions in one day system-wide.
    fn student_workload_conflicts(
        &self,
        candidate: &ScheduleAssignment,
        existing: &[ScheduleAssignment],
    ) -> Vec<ConflictRecord> {
        let mut conflicts = Vec::new();

        let same_slot = existing
            .iter()
            .filter(|a| a.time_slot_id == candidate.time_slot_id)
            .filter(|a| a.day_of_week == candidate.day_of_week)
            .count();
        if same_slot >= SLOT_SECTION_LIMIT {
            conflicts.push(ConflictRecord::new(
                ConflictKind::Workload,
                candidate.course_id,
                "too many sections in one popular slot",
                "shift some sections to other slots",
            ));
        }

        let same_day = existing
            .iter()
            .filter(|a| a.day_of_week == candidate.day_of_week)
            .count();
        if same_day >= DAILY_SESSION_LIMIT {
            conflicts.push(ConflictRecord::new(
                ConflictKind::Workload,
                candidate.course_id,
                "daily timetable too dense",
                "spread sessions across other days",
            ));
        }

        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(course: i64, teacher: i64, room: i64, slot: i64) -> ScheduleAssignment {
        ScheduleAssignment::new(course, room, slot, teacher)
            .with_day(2)
            .with_weeks(1, 18)
            .with_times(8 * 60, 10 * 60)
    }

    #[test]
    fn test_teacher_conflict_is_single_record() {
        // Shared teacher dominates: one record, classified Teacher, even
        // though the courses also differ.
        let a = assignment(1, 7, 101, 1);
        let b = assignment(2, 7, 102, 2);
        let conflicts = check_conflicts(&a, &[b]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Teacher);
        assert_eq!(conflicts[0].course1, 1);
        assert_eq!(conflicts[0].course2, Some(2));
    }

    #[test]
    fn test_classroom_conflict() {
        let a = assignment(1, 7, 101, 1);
        let b = assignment(2, 8, 101, 2);
        let conflicts = check_conflicts(&a, &[b]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Classroom);
    }

    #[test]
    fn test_student_conflict_is_coarse() {
        // Any two distinct courses in overlapping sessions clash, even in
        // different rooms with different teachers — the documented
        // over-approximation, independent of actual roster overlap.
        let a = assignment(1, 7, 101, 1);
        let b = assignment(2, 8, 102, 2);
        let conflicts = check_conflicts(&a, &[b]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Student);
    }

    #[test]
    fn test_no_conflict_without_time_collision() {
        let a = assignment(1, 7, 101, 1);
        let mut b = assignment(2, 7, 101, 2);
        b.day_of_week = 3;
        assert!(check_conflicts(&a, &[b]).is_empty());
    }

    #[test]
    fn test_same_course_not_a_student_conflict() {
        let a = assignment(1, 7, 101, 1);
        let b = assignment(1, 9, 102, 2);
        let conflicts = check_conflicts(&a, &[b]);
        assert!(conflicts.is_empty());
    }

    fn detector_with(courses: Vec<CourseOffering>) -> ConflictDetector {
        ConflictDetector::new(courses)
    }

    #[test]
    fn test_dependency_requires_basic_course() {
        let detector = detector_with(vec![
            CourseOffering::new(1, 7).with_name("Advanced Algebra"),
            CourseOffering::new(2, 8).with_name("Basic Algebra"),
        ]);
        let candidate = assignment(1, 7, 101, 1);

        // No basic course scheduled yet
        let conflicts = detector.check_advanced_conflicts(&candidate, &[]);
        assert!(conflicts.iter().any(|c| c.kind == ConflictKind::Dependency));

        // Basic course present on a different day
        let mut basic = assignment(2, 8, 102, 2);
        basic.day_of_week = 5;
        let conflicts = detector.check_advanced_conflicts(&candidate, &[basic]);
        assert!(!conflicts.iter().any(|c| c.kind == ConflictKind::Dependency));
    }

    #[test]
    fn test_lab_slot_contention() {
        let detector = detector_with(vec![
            CourseOffering::new(1, 7).with_course_type("lab"),
            CourseOffering::new(2, 8).with_course_type("lab"),
        ]);
        let candidate = assignment(1, 7, 101, 5);
        let mut other = assignment(2, 8, 102, 5);
        other.day_of_week = 4; // different day, same slot id still contends

        let conflicts = detector.check_advanced_conflicts(&candidate, &[other]);
        assert!(conflicts.iter().any(|c| c.kind == ConflictKind::Resource));
    }

    #[test]
    fn test_pe_allows_three_concurrent_sections() {
        let mut courses = vec![CourseOffering::new(1, 1).with_course_type("physical")];
        for id in 2..=4 {
            courses.push(CourseOffering::new(id, id).with_course_type("physical"));
        }
        let detector = detector_with(courses);
        let candidate = assignment(1, 1, 101, 5);

        let two_existing: Vec<_> = (2..=3).map(|id| assignment(id, id, 100 + id, 5)).collect();
        let conflicts = detector.check_advanced_conflicts(&candidate, &two_existing);
        assert!(!conflicts.iter().any(|c| c.kind == ConflictKind::Resource));

        let three_existing: Vec<_> = (2..=4).map(|id| assignment(id, id, 100 + id, 5)).collect();
        let conflicts = detector.check_advanced_conflicts(&candidate, &three_existing);
        assert!(conflicts.iter().any(|c| c.kind == ConflictKind::Resource));
    }

    #[test]
    fn test_continuity_same_day_and_wide_gap() {
        let detector = detector_with(vec![CourseOffering::new(1, 7)]);

        let candidate = assignment(1, 7, 101, 1); // day 2
        let same_day = assignment(1, 7, 102, 2); // day 2
        let conflicts = detector.check_advanced_conflicts(&candidate, &[same_day]);
        assert!(conflicts.iter().any(|c| c.kind == ConflictKind::Continuity));

        let mut far = assignment(1, 7, 102, 2);
        far.day_of_week = 6; // gap of 4 days
        let conflicts = detector.check_advanced_conflicts(&candidate, &[far]);
        assert!(conflicts.iter().any(|c| c.kind == ConflictKind::Continuity));

        let mut near = assignment(1, 7, 102, 2);
        near.day_of_week = 4; // gap of 2 days
        let conflicts = detector.check_advanced_conflicts(&candidate, &[near]);
        assert!(!conflicts.iter().any(|c| c.kind == ConflictKind::Continuity));
    }

    #[test]
    fn test_teacher_daily_workload_cap() {
        let detector = detector_with(vec![CourseOffering::new(99, 7)]);
        let candidate = assignment(99, 7, 101, 9);

        let three: Vec<_> = (1..=3).map(|i| assignment(i, 7, 100 + i, i)).collect();
        let conflicts = detector.check_advanced_conflicts(&candidate, &three);
        assert!(!conflicts.iter().any(|c| c.kind == ConflictKind::Workload));

        let four: Vec<_> = (1..=4).map(|i| assignment(i, 7, 100 + i, i)).collect();
        let conflicts = detector.check_advanced_conflicts(&candidate, &four);
        assert!(conflicts.iter().any(|c| c.kind == ConflictKind::Workload));
    }

    #[test]
    fn test_student_slot_density_cap() {
        let detector = detector_with(vec![CourseOffering::new(99, 99)]);
        let candidate = assignment(99, 99, 200, 5);

        // Five sections already in slot 5 on day 2, different teachers/rooms
        let five: Vec<_> = (1..=5).map(|i| assignment(i, i, 100 + i, 5)).collect();
        let conflicts = detector.check_advanced_conflicts(&candidate, &five);
        assert!(conflicts.iter().any(|c| c.kind == ConflictKind::Workload));
    }

    #[test]
    fn test_unknown_course_skips_extended_checks() {
        let detector = detector_with(vec![]);
        let candidate = assignment(1, 7, 101, 1);
        let other = assignment(2, 8, 102, 2);
        let conflicts = detector.check_advanced_conflicts(&candidate, &[other]);
        // Only checks that need no course data may fire; none do here
        assert!(!conflicts.iter().any(|c| {
            matches!(c.kind, ConflictKind::Dependency | ConflictKind::Resource)
        }));
    }
}
