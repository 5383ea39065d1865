//! Time-slot model.
//!
//! A time slot is a recurring weekly teaching period: a day of the week
//! plus a clock interval. All clock times are minutes since midnight.
//!
//! # Golden slots
//! The 9-11 and 14-16 start windows are high-demand "golden" periods,
//! reserved preferentially for priority courses by the matcher.

use serde::{Deserialize, Serialize};

/// Part of day a slot falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    /// Before 12:00.
    Morning,
    /// 12:00 to 18:00.
    Afternoon,
    /// 18:00 onward.
    Evening,
}

impl SlotType {
    /// Classifies a start time (minutes since midnight).
    pub fn from_start_min(start_min: i32) -> Self {
        match start_min / 60 {
            h if h < 12 => Self::Morning,
            h if h < 18 => Self::Afternoon,
            _ => Self::Evening,
        }
    }
}

/// A recurring weekly teaching period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: i64,
    /// Day of week, 1 (Monday) through 7 (Sunday).
    pub day_of_week: u8,
    /// Start time (minutes since midnight).
    pub start_min: i32,
    /// End time (minutes since midnight).
    pub end_min: i32,
    /// Period length in minutes.
    pub duration_minutes: i32,
    /// Part-of-day classification.
    pub slot_type: SlotType,
}

impl TimeSlot {
    /// Creates a new time slot. The slot type is derived from the start
    /// time and the duration from the interval.
    pub fn new(id: i64, day_of_week: u8, start_min: i32, end_min: i32) -> Self {
        Self {
            id,
            day_of_week,
            start_min,
            end_min,
            duration_minutes: end_min - start_min,
            slot_type: SlotType::from_start_min(start_min),
        }
    }

    /// Overrides the part-of-day classification.
    pub fn with_slot_type(mut self, slot_type: SlotType) -> Self {
        self.slot_type = slot_type;
        self
    }

    /// Hour of day the slot starts in.
    #[inline]
    pub fn start_hour(&self) -> i32 {
        self.start_min / 60
    }

    /// Whether this is a high-demand golden period (starts 9-11 or 14-16).
    pub fn is_golden(&self) -> bool {
        let hour = self.start_hour();
        (9..=10).contains(&hour) || (14..=15).contains(&hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_type_classification() {
        assert_eq!(SlotType::from_start_min(8 * 60), SlotType::Morning);
        assert_eq!(SlotType::from_start_min(11 * 60 + 59), SlotType::Morning);
        assert_eq!(SlotType::from_start_min(12 * 60), SlotType::Afternoon);
        assert_eq!(SlotType::from_start_min(17 * 60), SlotType::Afternoon);
        assert_eq!(SlotType::from_start_min(18 * 60), SlotType::Evening);
        assert_eq!(SlotType::from_start_min(20 * 60), SlotType::Evening);
    }

    #[test]
    fn test_time_slot_derived_fields() {
        let slot = TimeSlot::new(1, 2, 8 * 60, 10 * 60);
        assert_eq!(slot.duration_minutes, 120);
        assert_eq!(slot.slot_type, SlotType::Morning);
        assert_eq!(slot.start_hour(), 8);
    }

    #[test]
    fn test_golden_slots() {
        assert!(TimeSlot::new(1, 1, 9 * 60, 11 * 60).is_golden());
        assert!(TimeSlot::new(2, 1, 10 * 60 + 30, 12 * 60).is_golden());
        assert!(TimeSlot::new(3, 1, 14 * 60, 16 * 60).is_golden());
        assert!(TimeSlot::new(4, 1, 15 * 60 + 30, 17 * 60).is_golden());
        assert!(!TimeSlot::new(5, 1, 8 * 60, 10 * 60).is_golden());
        assert!(!TimeSlot::new(6, 1, 11 * 60, 12 * 60).is_golden());
        assert!(!TimeSlot::new(7, 1, 16 * 60, 18 * 60).is_golden());
    }

    #[test]
    fn test_slot_type_serde_lowercase() {
        let json = serde_json::to_string(&SlotType::Morning).unwrap();
        assert_eq!(json, "\"morning\"");
    }
}
