//! Quality evaluation for accepted assignments.
//!
//! The composite quality score summarizes how well an assignment fits,
//! in [0, 100]:
//!
//! | Component | Weight |
//! |-----------|--------|
//! | Classroom fit | 0.30 |
//! | Time-slot fit | 0.25 |
//! | Resource utilization | 0.20 |
//! | Student convenience | 0.15 |
//! | Teacher preference | 0.10 |
//!
//! Priority-course detection and teacher preference are behind
//! [`CoursePolicy`] so a persisted preference store can replace the
//! built-in heuristics without touching the scheduler core.

use crate::models::{Classroom, CourseOffering, ScheduleAssignment, TimeSlot};
use crate::scoring::compat::{classroom_score, time_slot_score};

const W_CLASSROOM: f64 = 0.30;
const W_TIME_SLOT: f64 = 0.25;
const W_UTILIZATION: f64 = 0.20;
const W_CONVENIENCE: f64 = 0.15;
const W_TEACHER: f64 = 0.10;

/// Pluggable course policy: which courses get golden slots, and how well
/// an assignment matches teacher preferences.
pub trait CoursePolicy {
    /// Whether the course is important enough to claim a golden slot.
    fn is_priority(&self, course: &CourseOffering) -> bool;

    /// Teacher-preference score for an assignment, in [0, 100].
    fn teacher_preference(&self, assignment: &ScheduleAssignment, course: &CourseOffering) -> f64;
}

/// Built-in policy using course-type and credit heuristics.
///
/// Core/required course types and offerings worth 4+ credits are
/// priority. Teacher preference rewards mid-day hours, mid-week days,
/// and recognized course types.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl CoursePolicy for HeuristicPolicy {
    fn is_priority(&self, course: &CourseOffering) -> bool {
        let t = course.course_type.to_lowercase();
        if t.contains("core") || t.contains("required") {
            return true;
        }
        course.credits.is_some_and(|c| c >= 4.0)
    }

    fn teacher_preference(&self, assignment: &ScheduleAssignment, course: &CourseOffering) -> f64 {
        let mut preference: f64 = 50.0;

        let hour = assignment.start_hour();
        preference += if (9..=16).contains(&hour) {
            15.0
        } else if (8..=17).contains(&hour) {
            10.0
        } else {
            5.0
        };

        preference += if course.is_type(&["lab", "computer"]) {
            12.0
        } else if course.is_type(&["lecture"]) {
            10.0
        } else {
            8.0
        };

        preference += match assignment.day_of_week {
            2..=4 => 10.0,
            1 | 5 => 8.0,
            _ => 5.0,
        };

        preference += if course.is_type(&["theory", "lecture", "lab", "practical", "seminar"]) {
            10.0
        } else {
            8.0
        };

        preference.clamp(0.0, 100.0)
    }
}

/// Composite weighted quality score for an accepted assignment,
/// clamped to [0, 100].
pub fn quality_score(
    assignment: &ScheduleAssignment,
    course: &CourseOffering,
    classroom: &Classroom,
    slot: &TimeSlot,
    policy: &dyn CoursePolicy,
) -> f64 {
    let score = classroom_score(classroom, course) * W_CLASSROOM
        + time_slot_score(slot, course) * W_TIME_SLOT
        + resource_utilization(classroom, slot) * W_UTILIZATION
        + student_convenience(assignment, classroom) * W_CONVENIENCE
        + policy.teacher_preference(assignment, course) * W_TEACHER;
    score.clamp(0.0, 100.0)
}

/// Expected utilization of a (classroom, time-slot) pairing, in [0, 100].
///
/// Deterministic: a hash of the two ids spreads the 60-90 base band,
/// then demand factors adjust for golden periods, off-hours, lunch, and
/// room type.
pub fn resource_utilization(classroom: &Classroom, slot: &TimeSlot) -> f64 {
    let sum = classroom.id.wrapping_add(slot.id);
    let hash = ((sum ^ (sum >> 32)) as i32).unsigned_abs();
    let base = 60.0 + f64::from(hash % 31);

    let hour = slot.start_hour();
    let time_factor = if slot.is_golden() {
        1.2
    } else if !(8..=18).contains(&hour) {
        0.8
    } else if (12..14).contains(&hour) {
        0.5
    } else {
        1.0
    };

    let room_factor = match classroom.classroom_type.as_str() {
        "computer_lab" => 1.1,
        "lecture_hall" => 1.15,
        _ => 1.0,
    };

    (base * time_factor * room_factor).clamp(0.0, 100.0)
}

/// Student convenience of an assignment, in [0, 100].
///
/// Additive heuristic over the session hour, room size and type, day of
/// week, and commute-hour avoidance.
pub fn student_convenience(assignment: &ScheduleAssignment, classroom: &Classroom) -> f64 {
    let mut convenience: f64 = 50.0;
    let hour = assignment.start_hour();

    convenience += if matches!(hour, 9 | 10 | 14 | 15) {
        20.0
    } else if (8..=17).contains(&hour) {
        15.0
    } else if !(8..=18).contains(&hour) {
        5.0
    } else {
        10.0
    };

    convenience += if (50..=100).contains(&classroom.capacity) {
        12.0
    } else if classroom.capacity > 100 {
        8.0
    } else {
        10.0
    };

    convenience += match assignment.day_of_week {
        2..=4 => 10.0,
        1 | 5 => 5.0,
        _ => 2.0,
    };

    convenience += if matches!(hour, 7 | 8 | 17 | 18) {
        2.0
    } else if (9..=16).contains(&hour) {
        8.0
    } else {
        5.0
    };

    convenience.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (ScheduleAssignment, CourseOffering, Classroom, TimeSlot) {
        let course = CourseOffering::new(1, 1)
            .with_course_type("lecture")
            .with_max_students(40);
        let room = Classroom::new(101, 50).with_classroom_type("classroom");
        let slot = TimeSlot::new(7, 2, 8 * 60, 10 * 60);
        let assignment = ScheduleAssignment::new(1, 101, 7, 1)
            .with_day(2)
            .with_times(8 * 60, 10 * 60);
        (assignment, course, room, slot)
    }

    #[test]
    fn test_quality_score_in_range_and_deterministic() {
        let (a, c, r, s) = fixture();
        let policy = HeuristicPolicy;
        let q = quality_score(&a, &c, &r, &s, &policy);
        assert!((0.0..=100.0).contains(&q));
        assert_eq!(q, quality_score(&a, &c, &r, &s, &policy));
    }

    #[test]
    fn test_resource_utilization_range() {
        for room_id in 0..20 {
            for slot_id in 0..20 {
                for start in [7, 9, 12, 15, 19] {
                    let room = Classroom::new(room_id, 60).with_classroom_type("lecture_hall");
                    let slot = TimeSlot::new(slot_id, 1, start * 60, start * 60 + 90);
                    let u = resource_utilization(&room, &slot);
                    assert!((0.0..=100.0).contains(&u));
                }
            }
        }
    }

    #[test]
    fn test_utilization_lunch_discount() {
        let room = Classroom::new(1, 60).with_classroom_type("classroom");
        let lunch = TimeSlot::new(5, 1, 12 * 60 + 30, 13 * 60 + 30);
        let golden = TimeSlot::new(5, 1, 9 * 60, 10 * 60 + 30);
        // Same ids → same base; only the demand factor differs
        assert!(resource_utilization(&room, &lunch) < resource_utilization(&room, &golden));
    }

    #[test]
    fn test_student_convenience_prefers_midweek_midmorning() {
        let room = Classroom::new(1, 60).with_classroom_type("classroom");
        let good = ScheduleAssignment::new(1, 1, 1, 1)
            .with_day(3)
            .with_times(9 * 60, 11 * 60);
        let bad = ScheduleAssignment::new(1, 1, 1, 1)
            .with_day(6)
            .with_times(19 * 60, 21 * 60);
        assert!(student_convenience(&good, &room) > student_convenience(&bad, &room));
    }

    #[test]
    fn test_priority_course_detection() {
        let policy = HeuristicPolicy;
        assert!(policy.is_priority(&CourseOffering::new(1, 1).with_course_type("core")));
        assert!(policy.is_priority(&CourseOffering::new(2, 1).with_course_type("required_math")));
        assert!(policy.is_priority(&CourseOffering::new(3, 1).with_credits(4.0)));
        assert!(!policy.is_priority(&CourseOffering::new(4, 1).with_course_type("elective").with_credits(2.0)));
    }

    #[test]
    fn test_teacher_preference_range() {
        let policy = HeuristicPolicy;
        for day in 1..=7 {
            for hour in [7, 9, 13, 17, 20] {
                let a = ScheduleAssignment::new(1, 1, 1, 1)
                    .with_day(day)
                    .with_times(hour * 60, hour * 60 + 90);
                let c = CourseOffering::new(1, 1).with_course_type("lecture");
                let p = policy.teacher_preference(&a, &c);
                assert!((0.0..=100.0).contains(&p));
            }
        }
    }

    #[test]
    fn test_custom_policy_substitutes() {
        struct AlwaysPriority;
        impl CoursePolicy for AlwaysPriority {
            fn is_priority(&self, _course: &CourseOffering) -> bool {
                true
            }
            fn teacher_preference(&self, _a: &ScheduleAssignment, _c: &CourseOffering) -> f64 {
                100.0
            }
        }

        let (a, c, r, s) = fixture();
        let q_custom = quality_score(&a, &c, &r, &s, &AlwaysPriority);
        let q_default = quality_score(&a, &c, &r, &s, &HeuristicPolicy);
        assert!(q_custom >= q_default);
    }
}
