//! Course offering model.
//!
//! A course offering is the unit of scheduling work: one course taught by
//! one teacher, to be placed into a (classroom, time-slot) pair. Offerings
//! are immutable once scheduling begins.

use serde::{Deserialize, Serialize};

/// A course offering to be scheduled.
///
/// `course_type` is an open string set ("lecture", "lab", "computer",
/// "seminar", "theory", "physical", ...) — unclassified types fall through
/// to permissive defaults in the compatibility checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOffering {
    /// Unique course identifier.
    pub id: i64,
    /// Course name (used by the dependency heuristic).
    pub name: String,
    /// Assigned teacher.
    pub teacher_id: i64,
    /// Course classification.
    pub course_type: String,
    /// Credit value. `None` = unknown.
    pub credits: Option<f64>,
    /// Total teaching hours. `None` = unknown.
    pub hours: Option<i32>,
    /// Enrollment cap. `None` = unknown.
    pub max_students: Option<i32>,
    /// Actual enrollment, refreshed from the enrollment counter when
    /// available. `None` = not yet counted.
    pub enrolled_students: Option<i32>,
}

impl CourseOffering {
    /// Creates a new course offering.
    pub fn new(id: i64, teacher_id: i64) -> Self {
        Self {
            id,
            name: String::new(),
            teacher_id,
            course_type: String::new(),
            credits: None,
            hours: None,
            max_students: None,
            enrolled_students: None,
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the course type.
    pub fn with_course_type(mut self, course_type: impl Into<String>) -> Self {
        self.course_type = course_type.into();
        self
    }

    /// Sets the credit value.
    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits = Some(credits);
        self
    }

    /// Sets the total teaching hours.
    pub fn with_hours(mut self, hours: i32) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Sets the enrollment cap.
    pub fn with_max_students(mut self, max_students: i32) -> Self {
        self.max_students = Some(max_students);
        self
    }

    /// Sets the actual enrollment.
    pub fn with_enrolled(mut self, enrolled: i32) -> Self {
        self.enrolled_students = Some(enrolled);
        self
    }

    /// Whether the course type matches any of the given labels
    /// (case-insensitive).
    pub fn is_type(&self, labels: &[&str]) -> bool {
        let t = self.course_type.to_lowercase();
        labels.iter().any(|l| t == *l)
    }

    /// Capacity the course needs in a classroom. Falls back to 30 when
    /// no enrollment cap is set.
    pub fn required_capacity(&self) -> i32 {
        self.max_students.unwrap_or(30)
    }

    /// Estimated head count for capacity checks.
    ///
    /// Prefers actual enrollment, then a capped fraction of the enrollment
    /// cap, then a flat default.
    pub fn estimated_students(&self) -> i32 {
        if let Some(enrolled) = self.enrolled_students {
            return enrolled;
        }
        if let Some(max) = self.max_students {
            return max.min(30);
        }
        25
    }
}
