//! Classroom and time-slot compatibility.
//!
//! Pure functions, no side effects. Scores rank candidates; the boolean
//! gates decide whether a pairing is admissible at all.
//!
//! The equipment and environment checks are keyword heuristics over room
//! type/name strings. Missing or unclassified data is fail-open: a room
//! without classification data is treated as compatible rather than
//! excluded.

use crate::models::{Classroom, CourseOffering, SlotType, TimeSlot};
use crate::scoring::quality::CoursePolicy;

/// Minimum seat count for a room to be considered for scheduling at all.
const MIN_USABLE_CAPACITY: i32 = 30;

/// Headroom factor applied to estimated enrollment in capacity checks.
const CAPACITY_HEADROOM: f64 = 1.2;

/// Scores how well a classroom fits a course, in [0, 100].
///
/// Base 50; +30 for capacity utilization in the 0.7-0.9 sweet spot
/// (+20 if merely sufficient); +20 for equipment compatibility.
pub fn classroom_score(classroom: &Classroom, course: &CourseOffering) -> f64 {
    let mut score = 50.0;

    let ratio = f64::from(course.required_capacity()) / f64::from(classroom.capacity);
    if (0.7..=0.9).contains(&ratio) {
        score += 30.0;
    } else if ratio <= 1.0 {
        score += 20.0;
    }

    if equipment_compatible(classroom, course) {
        score += 20.0;
    }

    score
}

/// Scores how well a time slot fits a course, in [0, 100].
///
/// Base 50; +25 for a morning start (8-11), +20 for an afternoon start
/// (14-17); +25 when the slot's part of day suits the course type.
pub fn time_slot_score(slot: &TimeSlot, course: &CourseOffering) -> f64 {
    let mut score = 50.0;

    let hour = slot.start_hour();
    if (8..=11).contains(&hour) {
        score += 25.0;
    } else if (14..=17).contains(&hour) {
        score += 20.0;
    }

    if course_type_time_match(course, slot) {
        score += 25.0;
    }

    score
}

/// Whether a classroom satisfies a course's equipment and environment
/// needs: type compatibility, capacity headroom, required equipment,
/// environment requirements.
pub fn equipment_compatible(classroom: &Classroom, course: &CourseOffering) -> bool {
    classroom_type_compatible(classroom, course)
        && capacity_adequate(classroom, course)
        && has_required_equipment(classroom, course)
        && meets_environment_requirements(classroom, course)
}

/// Room-type rules per course type. Unclassified course types are
/// satisfied by a plain classroom.
fn classroom_type_compatible(classroom: &Classroom, course: &CourseOffering) -> bool {
    match course.course_type.to_lowercase().as_str() {
        "lab" => classroom.is_type(&["laboratory", "computer_lab"]),
        "computer" => classroom.is_type(&["computer_lab"]),
        "lecture" => classroom.is_type(&["classroom", "lecture_hall"]),
        "seminar" => classroom.is_type(&["classroom"]) && classroom.capacity <= 50,
        _ => classroom.is_type(&["classroom"]),
    }
}

/// Capacity must cover estimated enrollment with 20% headroom.
fn capacity_adequate(classroom: &Classroom, course: &CourseOffering) -> bool {
    f64::from(classroom.capacity) >= f64::from(course.estimated_students()) * CAPACITY_HEADROOM
}

/// Equipment keyword checks per course type. Courses without special
/// needs pass unconditionally.
fn has_required_equipment(classroom: &Classroom, course: &CourseOffering) -> bool {
    match course.course_type.to_lowercase().as_str() {
        "computer" => classroom.type_contains("computer") || classroom.type_contains("lab"),
        "lab" => classroom.is_type(&["laboratory"]),
        "multimedia" => {
            classroom.classroom_type.is_empty()
                || classroom.type_contains("multimedia")
                || classroom.type_contains("media")
                || classroom.type_contains("lecture")
        }
        _ => true,
    }
}

/// Environment keyword checks over the room name. Unknown names pass.
fn meets_environment_requirements(classroom: &Classroom, course: &CourseOffering) -> bool {
    match course.course_type.to_lowercase().as_str() {
        "quiet" => {
            let name = classroom.name.to_lowercase();
            if name.contains("library") || name.contains("lab") {
                true
            } else {
                !(name.contains("gym") || name.contains("canteen"))
            }
        }
        "interactive" => classroom.capacity <= 40,
        _ => true,
    }
}

/// Whether the slot's part of day suits the course type. Labs run late,
/// lectures run early, seminars run in the afternoon; unclassified types
/// fit anywhere.
pub fn course_type_time_match(course: &CourseOffering, slot: &TimeSlot) -> bool {
    match course.course_type.to_lowercase().as_str() {
        "lab" | "computer" => {
            matches!(slot.slot_type, SlotType::Afternoon | SlotType::Evening)
        }
        "theory" | "lecture" | "physical" => {
            matches!(slot.slot_type, SlotType::Morning | SlotType::Afternoon)
        }
        "seminar" => matches!(slot.slot_type, SlotType::Afternoon),
        _ => true,
    }
}

/// Full admissibility gate for a (classroom, course, time-slot) pairing:
/// baseline room capacity, equipment compatibility, and time-slot
/// appropriateness.
pub fn is_optimal_match(
    classroom: &Classroom,
    course: &CourseOffering,
    slot: &TimeSlot,
    policy: &dyn CoursePolicy,
) -> bool {
    classroom_usable(classroom)
        && equipment_compatible(classroom, course)
        && time_slot_appropriate(slot, course, policy)
}

/// Baseline room check independent of the course.
pub(crate) fn classroom_usable(classroom: &Classroom) -> bool {
    classroom.capacity >= MIN_USABLE_CAPACITY
}

/// Whether a slot is appropriate for a course: part-of-day match,
/// duration bounds, golden-slot reservation, and student-rhythm rules.
pub fn time_slot_appropriate(
    slot: &TimeSlot,
    course: &CourseOffering,
    policy: &dyn CoursePolicy,
) -> bool {
    if !course_type_time_match(course, slot) {
        return false;
    }
    if !duration_appropriate(slot, course) {
        return false;
    }
    // Golden periods are held back for priority courses
    if slot.is_golden() && !policy.is_priority(course) {
        return false;
    }
    matches_student_schedule(slot, course)
}

/// Duration bounds per course type.
fn duration_appropriate(slot: &TimeSlot, course: &CourseOffering) -> bool {
    let d = slot.duration_minutes;
    match course.course_type.to_lowercase().as_str() {
        "lab" | "computer" => d >= 90,
        "lecture" => (45..=120).contains(&d),
        "seminar" => (60..=90).contains(&d),
        _ => d >= 45,
    }
}

/// Student daily-rhythm rules: no sessions before 8 or after 20, none
/// over lunch (12-14), and the dinner hour (17-18) only for courses
/// explicitly typed "evening".
fn matches_student_schedule(slot: &TimeSlot, course: &CourseOffering) -> bool {
    let hour = slot.start_hour();
    if !(8..=20).contains(&hour) {
        return false;
    }
    if (12..14).contains(&hour) {
        return false;
    }
    if hour == 17 {
        return course.course_type.eq_ignore_ascii_case("evening");
    }
    true
}
