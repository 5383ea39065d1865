//! Schedule assignment model.
//!
//! An assignment binds a course to a (classroom, time-slot) pair for a
//! span of weeks in one semester. Assignments are plain values: the
//! optimizer works on cloned vectors and mutates its private copies,
//! never the caller's input.
//!
//! # Overlap semantics
//! Two assignments overlap in time iff they fall on the same day of week,
//! their week ranges intersect (closed intervals), and their clock
//! intervals intersect (half-open).

use serde::{Deserialize, Serialize};

/// Meeting recurrence over the week range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekType {
    /// Meets every week.
    All,
    /// Meets on odd weeks only.
    Odd,
}

/// A scheduled course session: course × classroom × time slot × week range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    /// Scheduled course.
    pub course_id: i64,
    /// Assigned classroom.
    pub classroom_id: i64,
    /// Assigned time slot.
    pub time_slot_id: i64,
    /// Teacher (denormalized from the course for conflict checks).
    pub teacher_id: i64,
    /// Semester label (e.g. "2025-fall").
    pub semester: String,
    /// Academic year.
    pub academic_year: i32,
    /// Day of week, 1-7.
    pub day_of_week: u8,
    /// First teaching week (inclusive).
    pub start_week: u8,
    /// Last teaching week (inclusive).
    pub end_week: u8,
    /// Meeting recurrence.
    pub week_type: WeekType,
    /// Session start (minutes since midnight).
    pub start_min: i32,
    /// Session end (minutes since midnight).
    pub end_min: i32,
}

impl ScheduleAssignment {
    /// Creates a new assignment with default weeks 1-18, all-week
    /// recurrence, and an empty clock interval.
    pub fn new(course_id: i64, classroom_id: i64, time_slot_id: i64, teacher_id: i64) -> Self {
        Self {
            course_id,
            classroom_id,
            time_slot_id,
            teacher_id,
            semester: String::new(),
            academic_year: 0,
            day_of_week: 1,
            start_week: 1,
            end_week: 18,
            week_type: WeekType::All,
            start_min: 0,
            end_min: 0,
        }
    }

    /// Sets the semester and academic year.
    pub fn with_term(mut self, semester: impl Into<String>, academic_year: i32) -> Self {
        self.semester = semester.into();
        self.academic_year = academic_year;
        self
    }

    /// Sets the day of week.
    pub fn with_day(mut self, day_of_week: u8) -> Self {
        self.day_of_week = day_of_week;
        self
    }

    /// Sets the teaching-week range.
    pub fn with_weeks(mut self, start_week: u8, end_week: u8) -> Self {
        self.start_week = start_week;
        self.end_week = end_week;
        self
    }

    /// Sets the meeting recurrence.
    pub fn with_week_type(mut self, week_type: WeekType) -> Self {
        self.week_type = week_type;
        self
    }

    /// Sets the clock interval (minutes since midnight).
    pub fn with_times(mut self, start_min: i32, end_min: i32) -> Self {
        self.start_min = start_min;
        self.end_min = end_min;
        self
    }

    /// Whether the week ranges of two assignments intersect.
    #[inline]
    pub fn weeks_overlap(&self, other: &Self) -> bool {
        self.start_week <= other.end_week && other.start_week <= self.end_week
    }

    /// Whether the clock intervals of two assignments intersect.
    #[inline]
    pub fn times_overlap(&self, other: &Self) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }

    /// Whether two assignments collide in time: same day, intersecting
    /// week ranges, intersecting clock intervals.
    pub fn collides_with(&self, other: &Self) -> bool {
        self.day_of_week == other.day_of_week
            && self.weeks_overlap(other)
            && self.times_overlap(other)
    }

    /// Hour of day the session starts in.
    #[inline]
    pub fn start_hour(&self) -> i32 {
        self.start_min / 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(day: u8, start_week: u8, end_week: u8, start_min: i32, end_min: i32) -> ScheduleAssignment {
        ScheduleAssignment::new(1, 1, 1, 1)
            .with_day(day)
            .with_weeks(start_week, end_week)
            .with_times(start_min, end_min)
    }

    #[test]
    fn test_collision_requires_all_three_overlaps() {
        let a = assignment(2, 1, 18, 8 * 60, 10 * 60);

        // Same day, same weeks, same clock interval
        assert!(a.collides_with(&assignment(2, 1, 18, 8 * 60, 10 * 60)));
        // Partial clock overlap still collides
        assert!(a.collides_with(&assignment(2, 1, 18, 9 * 60, 11 * 60)));

        // Different day
        assert!(!a.collides_with(&assignment(3, 1, 18, 8 * 60, 10 * 60)));
        // Disjoint weeks
        assert!(!a.collides_with(&assignment(2, 19, 20, 8 * 60, 10 * 60)));
        // Back-to-back clock intervals do not overlap (half-open)
        assert!(!a.collides_with(&assignment(2, 1, 18, 10 * 60, 12 * 60)));
    }

    #[test]
    fn test_week_overlap_is_inclusive() {
        let a = assignment(1, 1, 9, 0, 60);
        let b = assignment(1, 9, 18, 0, 60);
        assert!(a.weeks_overlap(&b));
        assert!(b.weeks_overlap(&a));

        let c = assignment(1, 10, 18, 0, 60);
        assert!(!a.weeks_overlap(&c));
    }

    #[test]
    fn test_assignment_roundtrip() {
        let a = assignment(5, 2, 16, 14 * 60, 16 * 60)
            .with_term("2025-fall", 2025)
            .with_week_type(WeekType::Odd);
        let json = serde_json::to_string(&a).unwrap();
        let back: ScheduleAssignment = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
        assert!(json.contains("\"odd\""));
    }
}
