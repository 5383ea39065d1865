//! Conflict classification.
//!
//! A conflict records why a candidate assignment clashes with the existing
//! schedule. Kinds form a closed set with an explicit numeric priority:
//! the repair loop resolves teacher conflicts first, then classroom, then
//! student; the extended kinds are advisory and not directly repairable.

use serde::{Deserialize, Serialize};

/// Closed set of conflict classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    /// One teacher booked into two overlapping sessions.
    Teacher,
    /// One classroom booked for two overlapping sessions.
    Classroom,
    /// Two different courses share an overlapping session (coarse cohort
    /// approximation — see `check_conflicts`).
    Student,
    /// Specialized room or equipment contention, or no placement found.
    Resource,
    /// A prerequisite course is not on the schedule.
    Dependency,
    /// Sessions of one course are bunched or spread badly across the week.
    Continuity,
    /// Teacher or student session load exceeds a threshold.
    Workload,
}

impl ConflictKind {
    /// Repair priority. Higher resolves first; the extended kinds are
    /// advisory and carry no repair priority.
    pub fn priority(self) -> u8 {
        match self {
            Self::Teacher => 4,
            Self::Classroom => 3,
            Self::Student => 2,
            Self::Resource => 1,
            Self::Dependency | Self::Continuity | Self::Workload => 0,
        }
    }
}

/// A detected scheduling conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    /// Classification.
    pub kind: ConflictKind,
    /// Course on the candidate side.
    pub course1: i64,
    /// Course on the existing side, when the conflict is pairwise.
    pub course2: Option<i64>,
    /// Human-readable description.
    pub message: String,
    /// Suggested remediation.
    pub suggestion: String,
}

impl ConflictRecord {
    /// Creates a conflict record.
    pub fn new(
        kind: ConflictKind,
        course1: i64,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            course1,
            course2: None,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Sets the second course of a pairwise conflict.
    pub fn with_course2(mut self, course2: i64) -> Self {
        self.course2 = Some(course2);
        self
    }

    /// Repair priority of this conflict's kind.
    #[inline]
    pub fn priority(&self) -> u8 {
        self.kind.priority()
    }

    /// Creates a teacher double-booking conflict.
    pub fn teacher(course1: i64, course2: i64, teacher_id: i64) -> Self {
        Self::new(
            ConflictKind::Teacher,
            course1,
            format!("teacher {teacher_id} is double-booked"),
            "move one session or reassign the teacher",
        )
        .with_course2(course2)
    }

    /// Creates a classroom double-booking conflict.
    pub fn classroom(course1: i64, course2: i64, classroom_id: i64) -> Self {
        Self::new(
            ConflictKind::Classroom,
            course1,
            format!("classroom {classroom_id} is double-booked"),
            "move one session or use another room",
        )
        .with_course2(course2)
    }

    /// Creates a student cohort-overlap conflict.
    pub fn student(course1: i64, course2: i64) -> Self {
        Self::new(
            ConflictKind::Student,
            course1,
            "student cohort overlap between concurrent sessions",
            "move one session",
        )
        .with_course2(course2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(ConflictKind::Teacher.priority() > ConflictKind::Classroom.priority());
        assert!(ConflictKind::Classroom.priority() > ConflictKind::Student.priority());
        assert!(ConflictKind::Student.priority() > ConflictKind::Resource.priority());
        assert_eq!(ConflictKind::Dependency.priority(), 0);
        assert_eq!(ConflictKind::Continuity.priority(), 0);
        assert_eq!(ConflictKind::Workload.priority(), 0);
    }

    #[test]
    fn test_factories() {
        let t = ConflictRecord::teacher(10, 20, 7);
        assert_eq!(t.kind, ConflictKind::Teacher);
        assert_eq!(t.course1, 10);
        assert_eq!(t.course2, Some(20));
        assert!(t.message.contains('7'));

        let s = ConflictRecord::student(1, 2);
        assert_eq!(s.kind, ConflictKind::Student);
        assert_eq!(s.priority(), 2);

        let r = ConflictRecord::new(ConflictKind::Resource, 5, "no fit", "widen slots");
        assert_eq!(r.course2, None);
        assert_eq!(r.priority(), 1);
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&ConflictKind::Teacher).unwrap();
        assert_eq!(json, "\"teacher\"");
    }
}
