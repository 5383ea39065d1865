//! Greedy matcher and batch scheduling entry point.
//!
//! # Algorithm
//!
//! Per course:
//! 1. Rank classrooms and time slots by compatibility score, descending.
//!    Sorts are stable: equal scores keep provider order.
//! 2. Walk slots (outer) × rooms (inner); the first admissible pair that
//!    passes the comprehensive conflict check against the semester's
//!    existing assignments wins.
//! 3. Record the composite quality score and return the assignment, or a
//!    Resource conflict with suggestions when the search exhausts.
//!
//! The batch entry resolves resources through the collaborator traits,
//! runs the per-course search sequentially, persists accepted assignments
//! as one atomic batch, and aggregates statistics. Batch items are
//! checked against pre-existing assignments only, not against each other;
//! `validate_schedule` + `optimize_schedule` repair cross-batch clashes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::conflict::detector::ConflictDetector;
use crate::conflict::resolver::{
    validate_schedule, ConflictResolver, OptimizationStatistics, OptimizeResult, ValidationReport,
};
use crate::error::ScheduleError;
use crate::models::{
    Classroom, ConflictKind, ConflictRecord, CourseOffering, ScheduleAssignment, TimeSlot,
    WeekType,
};
use crate::providers::{
    ClassroomProvider, CourseProvider, EnrollmentCounter, ScheduleStore, TimeSlotProvider,
};
use crate::scheduler::stats::ScheduleStatistics;
use crate::scoring::compat::{classroom_score, classroom_usable, is_optimal_match, time_slot_score};
use crate::scoring::quality::{quality_score, CoursePolicy, HeuristicPolicy};

/// Default teaching-week range when the request leaves it open.
const DEFAULT_START_WEEK: u8 = 1;
const DEFAULT_END_WEEK: u8 = 18;

/// Suggestions attached to a placement failure.
const FAILURE_SUGGESTIONS: [&str; 3] = [
    "widen the set of available time slots",
    "consider larger-capacity classrooms",
    "adjust the course's time preferences",
];

/// A scheduling request for one (semester, academic year).
///
/// Empty `classroom_ids`/`time_slot_ids` mean "use everything the
/// providers know".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Courses to place.
    pub course_ids: Vec<i64>,
    /// Restriction to specific rooms; empty = all.
    pub classroom_ids: Vec<i64>,
    /// Restriction to specific slots; empty = all.
    pub time_slot_ids: Vec<i64>,
    /// Target semester.
    pub semester: String,
    /// Target academic year.
    pub academic_year: i32,
    /// First teaching week; defaults to 1.
    pub start_week: Option<u8>,
    /// Last teaching week; defaults to 18.
    pub end_week: Option<u8>,
}

impl ScheduleRequest {
    /// Creates a request for the given term and courses.
    pub fn new(semester: impl Into<String>, academic_year: i32, course_ids: Vec<i64>) -> Self {
        Self {
            course_ids,
            classroom_ids: Vec::new(),
            time_slot_ids: Vec::new(),
            semester: semester.into(),
            academic_year,
            start_week: None,
            end_week: None,
        }
    }

    /// Restricts the search to specific classrooms.
    pub fn with_classrooms(mut self, classroom_ids: Vec<i64>) -> Self {
        self.classroom_ids = classroom_ids;
        self
    }

    /// Restricts the search to specific time slots.
    pub fn with_time_slots(mut self, time_slot_ids: Vec<i64>) -> Self {
        self.time_slot_ids = time_slot_ids;
        self
    }

    /// Sets the teaching-week range.
    pub fn with_weeks(mut self, start_week: u8, end_week: u8) -> Self {
        self.start_week = Some(start_week);
        self.end_week = Some(end_week);
        self
    }

    /// Structural validation, checked before any resource lookup.
    fn validate(&self) -> Result<(), String> {
        if self.semester.is_empty() {
            return Err("invalid request: semester is required".into());
        }
        if self.academic_year <= 0 {
            return Err("invalid request: academic year is required".into());
        }
        if self.course_ids.is_empty() {
            return Err("invalid request: course ids are required".into());
        }
        Ok(())
    }
}

/// Outcome of a batch scheduling call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Whether the batch ran to completion (individual courses may still
    /// have failed; see `conflicts`).
    pub success: bool,
    /// Summary message.
    pub message: String,
    /// Accepted (and persisted) assignments.
    pub assignments: Vec<ScheduleAssignment>,
    /// Conflicts recorded for courses that could not be placed.
    pub conflicts: Vec<ConflictRecord>,
    /// Batch statistics, when the batch ran.
    pub statistics: Option<ScheduleStatistics>,
}

impl ScheduleResult {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            assignments: Vec::new(),
            conflicts: Vec::new(),
            statistics: None,
        }
    }
}

/// Automatic course scheduler over pluggable resource providers.
///
/// # Example
///
/// ```
/// use campus_timetable::models::{Classroom, CourseOffering, TimeSlot};
/// use campus_timetable::providers::{
///     InMemoryClassrooms, InMemoryCourses, InMemoryScheduleStore, InMemoryTimeSlots,
/// };
/// use campus_timetable::scheduler::{AutoScheduler, ScheduleRequest};
///
/// let courses = InMemoryCourses::new(vec![
///     CourseOffering::new(1, 7)
///         .with_course_type("lecture")
///         .with_max_students(40),
/// ]);
/// let classrooms = InMemoryClassrooms::new(vec![
///     Classroom::new(101, 50).with_classroom_type("classroom"),
/// ]);
/// let slots = InMemoryTimeSlots::new(vec![TimeSlot::new(1, 2, 8 * 60, 10 * 60)]);
/// let store = InMemoryScheduleStore::new();
///
/// let scheduler = AutoScheduler::new(&courses, &classrooms, &slots, &store);
/// let result = scheduler.auto_schedule(&ScheduleRequest::new("2025-fall", 2025, vec![1]));
/// assert!(result.success);
/// assert_eq!(result.assignments.len(), 1);
/// assert!(result.conflicts.is_empty());
/// ```
pub struct AutoScheduler<'a> {
    courses: &'a dyn CourseProvider,
    classrooms: &'a dyn ClassroomProvider,
    time_slots: &'a dyn TimeSlotProvider,
    store: &'a dyn ScheduleStore,
    enrollment: Option<&'a dyn EnrollmentCounter>,
    policy: Box<dyn CoursePolicy>,
}

impl<'a> AutoScheduler<'a> {
    /// Creates a scheduler with the built-in heuristic course policy.
    pub fn new(
        courses: &'a dyn CourseProvider,
        classrooms: &'a dyn ClassroomProvider,
        time_slots: &'a dyn TimeSlotProvider,
        store: &'a dyn ScheduleStore,
    ) -> Self {
        Self {
            courses,
            classrooms,
            time_slots,
            store,
            enrollment: None,
            policy: Box::new(HeuristicPolicy),
        }
    }

    /// Attaches an enrollment counter; actual head counts then refine the
    /// capacity checks.
    pub fn with_enrollment(mut self, counter: &'a dyn EnrollmentCounter) -> Self {
        self.enrollment = Some(counter);
        self
    }

    /// Replaces the course policy (priority detection, teacher
    /// preference).
    pub fn with_policy(mut self, policy: impl CoursePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Schedules a batch of courses for one term.
    ///
    /// Runs the per-course greedy search sequentially, persists accepted
    /// assignments as one batch, and returns assignments, conflicts, and
    /// statistics. No error escapes: any internal failure becomes a
    /// failed result with a message.
    pub fn auto_schedule(&self, request: &ScheduleRequest) -> ScheduleResult {
        match self.run_schedule(request) {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "scheduling failed");
                ScheduleResult::failure(format!("scheduling failed: {e}"))
            }
        }
    }

    fn run_schedule(&self, request: &ScheduleRequest) -> Result<ScheduleResult, ScheduleError> {
        if let Err(reason) = request.validate() {
            return Ok(ScheduleResult::failure(reason));
        }

        let mut courses = self.courses.find_by_ids(&request.course_ids)?;
        if courses.is_empty() {
            return Ok(ScheduleResult::failure("no matching courses found"));
        }
        self.refresh_enrollment(&mut courses);

        let classrooms = if request.classroom_ids.is_empty() {
            self.classrooms.find_all()?
        } else {
            self.classrooms.find_by_ids(&request.classroom_ids)?
        };
        let time_slots = if request.time_slot_ids.is_empty() {
            self.time_slots.find_all()?
        } else {
            self.time_slots.find_by_ids(&request.time_slot_ids)?
        };

        let existing = self
            .store
            .find_by_semester(&request.semester, request.academic_year)?;
        let detector = self.build_detector(&courses, &existing)?;

        let mut assignments = Vec::new();
        let mut conflicts = Vec::new();

        for course in &courses {
            match self.schedule_course(course, &classrooms, &time_slots, &existing, &detector, request)
            {
                Ok(assignment) => assignments.push(assignment),
                Err(conflict) => {
                    warn!(course = course.id, "course could not be placed");
                    conflicts.push(conflict);
                }
            }
        }

        let assignments = if assignments.is_empty() {
            assignments
        } else {
            self.store.save_batch(&assignments)?
        };

        let statistics =
            ScheduleStatistics::from_batch(courses.len(), assignments.len(), &conflicts);
        info!(
            scheduled = assignments.len(),
            failed = conflicts.len(),
            "batch scheduling complete"
        );

        Ok(ScheduleResult {
            success: true,
            message: "scheduling complete".into(),
            assignments,
            conflicts,
            statistics: Some(statistics),
        })
    }

    /// Validates a schedule; thin wrapper over [`validate_schedule`].
    pub fn validate(&self, assignments: &[ScheduleAssignment]) -> ValidationReport {
        validate_schedule(assignments)
    }

    /// Repairs conflicts in an assignment set with the bounded
    /// priority-driven loop. No error escapes.
    pub fn optimize_schedule(
        &self,
        assignments: &[ScheduleAssignment],
        request: &ScheduleRequest,
    ) -> OptimizeResult {
        match self.run_optimize(assignments, request) {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "optimization failed");
                OptimizeResult {
                    success: false,
                    message: format!("optimization failed: {e}"),
                    assignments: assignments.to_vec(),
                    conflicts: Vec::new(),
                    statistics: OptimizationStatistics {
                        resolved_count: 0,
                        remaining_conflicts: 0,
                        optimization_rate: 0.0,
                    },
                }
            }
        }
    }

    fn run_optimize(
        &self,
        assignments: &[ScheduleAssignment],
        request: &ScheduleRequest,
    ) -> Result<OptimizeResult, ScheduleError> {
        let classrooms = if request.classroom_ids.is_empty() {
            self.classrooms.find_all()?
        } else {
            self.classrooms.find_by_ids(&request.classroom_ids)?
        };
        let time_slots = if request.time_slot_ids.is_empty() {
            self.time_slots.find_all()?
        } else {
            self.time_slots.find_by_ids(&request.time_slot_ids)?
        };

        let course_ids: Vec<i64> = assignments
            .iter()
            .map(|a| a.course_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let courses = self.courses.find_by_ids(&course_ids)?;

        let resolver = ConflictResolver::new(&classrooms, &time_slots, courses);
        Ok(resolver.optimize(assignments))
    }

    /// Validates then persists an externally produced schedule as one
    /// batch. Rejected wholesale if validation finds any conflict.
    pub fn batch_import(&self, assignments: &[ScheduleAssignment]) -> ScheduleResult {
        let report = validate_schedule(assignments);
        if !report.success {
            return ScheduleResult {
                success: false,
                message: format!("import rejected: {} conflicts", report.conflicts.len()),
                assignments: Vec::new(),
                conflicts: report.conflicts,
                statistics: None,
            };
        }

        match self.store.save_batch(assignments) {
            Ok(saved) => ScheduleResult {
                success: true,
                message: "batch import complete".into(),
                assignments: saved,
                conflicts: Vec::new(),
                statistics: None,
            },
            Err(e) => {
                error!(error = %e, "batch import failed");
                ScheduleResult::failure(format!("batch import failed: {e}"))
            }
        }
    }

    /// Deletes a term's assignments. Returns whether the deletion ran.
    pub fn clear_schedule(&self, semester: &str, academic_year: i32) -> bool {
        match self.store.delete_by_semester(semester, academic_year) {
            Ok(removed) => {
                info!(semester, academic_year, removed, "cleared semester schedule");
                true
            }
            Err(e) => {
                error!(error = %e, "failed to clear schedule");
                false
            }
        }
    }

    /// Copies a term's assignments into another term.
    pub fn copy_schedule(
        &self,
        source_semester: &str,
        source_year: i32,
        target_semester: &str,
        target_year: i32,
    ) -> ScheduleResult {
        let source = match self.store.find_by_semester(source_semester, source_year) {
            Ok(source) => source,
            Err(e) => return ScheduleResult::failure(format!("schedule copy failed: {e}")),
        };
        if source.is_empty() {
            return ScheduleResult::failure("source semester has no assignments");
        }

        let copies: Vec<ScheduleAssignment> = source
            .iter()
            .map(|a| {
                let mut copy = a.clone();
                copy.semester = target_semester.to_string();
                copy.academic_year = target_year;
                copy
            })
            .collect();

        match self.store.save_batch(&copies) {
            Ok(saved) => ScheduleResult {
                success: true,
                message: "schedule copy complete".into(),
                assignments: saved,
                conflicts: Vec::new(),
                statistics: None,
            },
            Err(e) => ScheduleResult::failure(format!("schedule copy failed: {e}")),
        }
    }

    /// Statistics for a term's stored schedule, measured against the full
    /// course catalog.
    pub fn schedule_statistics(
        &self,
        semester: &str,
        academic_year: i32,
    ) -> Result<ScheduleStatistics, ScheduleError> {
        let all_courses = self.courses.find_all()?;
        let stored = self.store.find_by_semester(semester, academic_year)?;
        let report = validate_schedule(&stored);
        Ok(ScheduleStatistics::from_batch(
            all_courses.len(),
            stored.len(),
            &report.conflicts,
        ))
    }

    /// Time slots not yet occupied by the given room or teacher in a term.
    pub fn available_time_slots(
        &self,
        classroom_id: Option<i64>,
        teacher_id: Option<i64>,
        semester: &str,
        academic_year: i32,
    ) -> Result<Vec<TimeSlot>, ScheduleError> {
        let slots = self.time_slots.find_all()?;
        let existing = self.store.find_by_semester(semester, academic_year)?;

        Ok(slots
            .into_iter()
            .filter(|slot| {
                !existing.iter().any(|a| {
                    a.time_slot_id == slot.id
                        && (classroom_id.is_some_and(|c| a.classroom_id == c)
                            || teacher_id.is_some_and(|t| a.teacher_id == t))
                })
            })
            .collect())
    }

    /// Rooms that can hold the given head count, smallest first.
    pub fn recommended_classrooms(
        &self,
        _course: &CourseOffering,
        student_count: i32,
    ) -> Result<Vec<Classroom>, ScheduleError> {
        let mut rooms: Vec<Classroom> = self
            .classrooms
            .find_all()?
            .into_iter()
            .filter(|r| r.capacity >= student_count)
            .filter(classroom_usable)
            .collect();
        rooms.sort_by_key(|r| r.capacity);
        Ok(rooms)
    }

    fn refresh_enrollment(&self, courses: &mut [CourseOffering]) {
        let Some(counter) = self.enrollment else {
            return;
        };
        for course in courses {
            match counter.count_by_course(course.id) {
                Ok(count) if count > 0 => course.enrolled_students = Some(count),
                Ok(_) => {}
                Err(e) => warn!(course = course.id, error = %e, "enrollment lookup failed"),
            }
        }
    }

    /// Builds the conflict detector's course index: the batch courses
    /// plus the courses behind the term's existing assignments.
    fn build_detector(
        &self,
        batch: &[CourseOffering],
        existing: &[ScheduleAssignment],
    ) -> Result<ConflictDetector, ScheduleError> {
        let known: HashSet<i64> = batch.iter().map(|c| c.id).collect();
        let missing: Vec<i64> = existing
            .iter()
            .map(|a| a.course_id)
            .filter(|id| !known.contains(id))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut all = batch.to_vec();
        if !missing.is_empty() {
            all.extend(self.courses.find_by_ids(&missing)?);
        }
        Ok(ConflictDetector::new(all))
    }

    /// Greedy search for one course over ranked slot × room pairs.
    fn schedule_course(
        &self,
        course: &CourseOffering,
        classrooms: &[Classroom],
        time_slots: &[TimeSlot],
        existing: &[ScheduleAssignment],
        detector: &ConflictDetector,
        request: &ScheduleRequest,
    ) -> Result<ScheduleAssignment, ConflictRecord> {
        // Decorate-sort keeps ties in provider order and scores each
        // candidate exactly once.
        let mut ranked_rooms: Vec<(f64, &Classroom)> = classrooms
            .iter()
            .map(|r| (classroom_score(r, course), r))
            .collect();
        ranked_rooms.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut ranked_slots: Vec<(f64, &TimeSlot)> = time_slots
            .iter()
            .map(|s| (time_slot_score(s, course), s))
            .collect();
        ranked_slots.sort_by(|a, b| b.0.total_cmp(&a.0));

        for &(_, slot) in &ranked_slots {
            for &(_, room) in &ranked_rooms {
                if !is_optimal_match(room, course, slot, self.policy.as_ref()) {
                    continue;
                }

                let candidate = self.build_assignment(course, room, slot, request);
                let conflicts = detector.comprehensive_check(&candidate, existing);
                if conflicts.is_empty() {
                    let quality =
                        quality_score(&candidate, course, room, slot, self.policy.as_ref());
                    info!(
                        course = course.id,
                        classroom = room.id,
                        slot = slot.id,
                        quality,
                        "course placed"
                    );
                    return Ok(candidate);
                }
            }
        }

        Err(ConflictRecord::new(
            ConflictKind::Resource,
            course.id,
            "no suitable classroom and time-slot combination found",
            FAILURE_SUGGESTIONS.join("; "),
        ))
    }

    fn build_assignment(
        &self,
        course: &CourseOffering,
        room: &Classroom,
        slot: &TimeSlot,
        request: &ScheduleRequest,
    ) -> ScheduleAssignment {
        ScheduleAssignment::new(course.id, room.id, slot.id, course.teacher_id)
            .with_term(request.semester.as_str(), request.academic_year)
            .with_day(Self::optimal_day_of_week(slot, course))
            .with_weeks(
                request.start_week.unwrap_or(DEFAULT_START_WEEK),
                request.end_week.unwrap_or(DEFAULT_END_WEEK),
            )
            .with_week_type(Self::week_type_for(course))
            .with_times(slot.start_min, slot.end_min)
    }

    /// Day-of-week choice: course-type preference first, then the slot's
    /// hour band, then a spread by course id.
    fn optimal_day_of_week(slot: &TimeSlot, course: &CourseOffering) -> u8 {
        match course.course_type.to_lowercase().as_str() {
            "lecture" | "theory" => return 2,
            "lab" => return 4,
            "pe" | "physical" => return 3,
            _ => {}
        }

        let hour = slot.start_hour();
        if (8..=10).contains(&hour) {
            2
        } else if (14..=16).contains(&hour) {
            3
        } else if (19..=21).contains(&hour) {
            1
        } else {
            (course.id.rem_euclid(5) + 1) as u8
        }
    }

    /// Week recurrence: substantial courses meet every week, light ones
    /// alternate.
    fn week_type_for(course: &CourseOffering) -> WeekType {
        if let Some(credits) = course.credits {
            return if credits >= 2.0 {
                WeekType::All
            } else {
                WeekType::Odd
            };
        }

        if !course.course_type.is_empty() {
            return match course.course_type.to_lowercase().as_str() {
                "elective" => WeekType::Odd,
                _ => WeekType::All,
            };
        }

        if course.hours.is_some_and(|h| h <= 32) {
            return WeekType::Odd;
        }
        WeekType::All
    }
}
