//! Collaborator interfaces.
//!
//! The engine reads courses, classrooms, time slots, and existing
//! assignments through these traits and persists accepted batches through
//! `ScheduleStore`. Implementations typically sit on a relational store;
//! the in-memory implementations here back the tests and small embeddings.
//!
//! Lookup methods filter silently: an unknown id simply does not appear in
//! the returned list, and the batch continues with what was found.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::ScheduleError;
use crate::models::{Classroom, CourseOffering, ScheduleAssignment, TimeSlot};

/// Supplies course offerings.
pub trait CourseProvider {
    /// Returns every known course offering.
    fn find_all(&self) -> Result<Vec<CourseOffering>, ScheduleError>;

    /// Returns the offerings with the given ids, skipping unknown ids.
    fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<CourseOffering>, ScheduleError>;
}

/// Supplies classrooms.
pub trait ClassroomProvider {
    /// Returns every known classroom.
    fn find_all(&self) -> Result<Vec<Classroom>, ScheduleError>;

    /// Returns the classrooms with the given ids, skipping unknown ids.
    fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Classroom>, ScheduleError>;
}

/// Supplies weekly time slots.
pub trait TimeSlotProvider {
    /// Returns every known time slot.
    fn find_all(&self) -> Result<Vec<TimeSlot>, ScheduleError>;

    /// Returns the slots with the given ids, skipping unknown ids.
    fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<TimeSlot>, ScheduleError>;
}

/// Reads and persists schedule assignments.
///
/// `save_batch` is the only write the engine performs per request, issued
/// once after the full algorithm completes.
pub trait ScheduleStore {
    /// Returns the assignments stored for a (semester, academic year).
    fn find_by_semester(
        &self,
        semester: &str,
        academic_year: i32,
    ) -> Result<Vec<ScheduleAssignment>, ScheduleError>;

    /// Persists a batch atomically and returns the stored assignments.
    fn save_batch(
        &self,
        assignments: &[ScheduleAssignment],
    ) -> Result<Vec<ScheduleAssignment>, ScheduleError>;

    /// Deletes all assignments for a (semester, academic year), returning
    /// how many were removed.
    fn delete_by_semester(
        &self,
        semester: &str,
        academic_year: i32,
    ) -> Result<usize, ScheduleError>;
}

/// Counts actual enrollment per course.
pub trait EnrollmentCounter {
    /// Number of students enrolled in the course.
    fn count_by_course(&self, course_id: i64) -> Result<i32, ScheduleError>;
}

// ======================== In-memory implementations ========================

/// In-memory course catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourses {
    courses: Vec<CourseOffering>,
}

impl InMemoryCourses {
    /// Creates a catalog from a list of offerings.
    pub fn new(courses: Vec<CourseOffering>) -> Self {
        Self { courses }
    }
}

impl CourseProvider for InMemoryCourses {
    fn find_all(&self) -> Result<Vec<CourseOffering>, ScheduleError> {
        Ok(self.courses.clone())
    }

    fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<CourseOffering>, ScheduleError> {
        Ok(self
            .courses
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }
}

/// In-memory classroom inventory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClassrooms {
    classrooms: Vec<Classroom>,
}

impl InMemoryClassrooms {
    /// Creates an inventory from a list of classrooms.
    pub fn new(classrooms: Vec<Classroom>) -> Self {
        Self { classrooms }
    }
}

impl ClassroomProvider for InMemoryClassrooms {
    fn find_all(&self) -> Result<Vec<Classroom>, ScheduleError> {
        Ok(self.classrooms.clone())
    }

    fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Classroom>, ScheduleError> {
        Ok(self
            .classrooms
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }
}

/// In-memory time-slot table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimeSlots {
    slots: Vec<TimeSlot>,
}

impl InMemoryTimeSlots {
    /// Creates a table from a list of slots.
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        Self { slots }
    }
}

impl TimeSlotProvider for InMemoryTimeSlots {
    fn find_all(&self) -> Result<Vec<TimeSlot>, ScheduleError> {
        Ok(self.slots.clone())
    }

    fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<TimeSlot>, ScheduleError> {
        Ok(self
            .slots
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }
}

/// In-memory assignment store.
///
/// Interior mutability keeps the trait read-compatible with shared
/// references; the engine is single-threaded per request.
#[derive(Debug, Default)]
pub struct InMemoryScheduleStore {
    assignments: RefCell<Vec<ScheduleAssignment>>,
}

impl InMemoryScheduleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with assignments.
    pub fn with_assignments(assignments: Vec<ScheduleAssignment>) -> Self {
        Self {
            assignments: RefCell::new(assignments),
        }
    }

    /// Total number of stored assignments.
    pub fn len(&self) -> usize {
        self.assignments.borrow().len()
    }

    /// Whether the store holds no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.borrow().is_empty()
    }
}

impl ScheduleStore for InMemoryScheduleStore {
    fn find_by_semester(
        &self,
        semester: &str,
        academic_year: i32,
    ) -> Result<Vec<ScheduleAssignment>, ScheduleError> {
        Ok(self
            .assignments
            .borrow()
            .iter()
            .filter(|a| a.semester == semester && a.academic_year == academic_year)
            .cloned()
            .collect())
    }

    fn save_batch(
        &self,
        assignments: &[ScheduleAssignment],
    ) -> Result<Vec<ScheduleAssignment>, ScheduleError> {
        self.assignments.borrow_mut().extend_from_slice(assignments);
        Ok(assignments.to_vec())
    }

    fn delete_by_semester(
        &self,
        semester: &str,
        academic_year: i32,
    ) -> Result<usize, ScheduleError> {
        let mut stored = self.assignments.borrow_mut();
        let before = stored.len();
        stored.retain(|a| !(a.semester == semester && a.academic_year == academic_year));
        Ok(before - stored.len())
    }
}

/// In-memory enrollment counts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnrollment {
    counts: HashMap<i64, i32>,
}

impl InMemoryEnrollment {
    /// Creates a counter from (course id, count) pairs.
    pub fn new(counts: impl IntoIterator<Item = (i64, i32)>) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }
}

impl EnrollmentCounter for InMemoryEnrollment {
    fn count_by_course(&self, course_id: i64) -> Result<i32, ScheduleError> {
        Ok(self.counts.get(&course_id).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_ids_skips_unknown() {
        let provider = InMemoryCourses::new(vec![
            CourseOffering::new(1, 10),
            CourseOffering::new(2, 11),
        ]);
        let found = provider.find_by_ids(&[2, 99]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn test_store_semester_filter() {
        let store = InMemoryScheduleStore::with_assignments(vec![
            ScheduleAssignment::new(1, 1, 1, 1).with_term("2025-fall", 2025),
            ScheduleAssignment::new(2, 1, 2, 1).with_term("2026-spring", 2026),
        ]);

        let fall = store.find_by_semester("2025-fall", 2025).unwrap();
        assert_eq!(fall.len(), 1);
        assert_eq!(fall[0].course_id, 1);
    }

    #[test]
    fn test_store_save_and_delete() {
        let store = InMemoryScheduleStore::new();
        let batch = vec![
            ScheduleAssignment::new(1, 1, 1, 1).with_term("2025-fall", 2025),
            ScheduleAssignment::new(2, 2, 2, 2).with_term("2025-fall", 2025),
        ];
        let saved = store.save_batch(&batch).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(store.len(), 2);

        let removed = store.delete_by_semester("2025-fall", 2025).unwrap();
        assert_eq!(removed, 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_enrollment_counter_default_zero() {
        let counter = InMemoryEnrollment::new([(1, 35)]);
        assert_eq!(counter.count_by_course(1).unwrap(), 35);
        assert_eq!(counter.count_by_course(2).unwrap(), 0);
    }
}
