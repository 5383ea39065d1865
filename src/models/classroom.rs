//! Classroom model.
//!
//! Classrooms are read-only resources. `classroom_type` is an open string
//! set ("classroom", "lecture_hall", "laboratory", "computer_lab", ...);
//! the compatibility checks treat unknown types permissively.

use serde::{Deserialize, Serialize};

/// A classroom that courses can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: i64,
    /// Room name or number (used by the environment heuristics).
    pub name: String,
    /// Room classification.
    pub classroom_type: String,
    /// Seat count.
    pub capacity: i32,
    /// Building name.
    pub building: String,
}

impl Classroom {
    /// Creates a new classroom.
    pub fn new(id: i64, capacity: i32) -> Self {
        Self {
            id,
            name: String::new(),
            classroom_type: String::new(),
            capacity,
            building: String::new(),
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the room type.
    pub fn with_classroom_type(mut self, classroom_type: impl Into<String>) -> Self {
        self.classroom_type = classroom_type.into();
        self
    }

    /// Sets the building.
    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = building.into();
        self
    }

    /// Whether the room type matches any of the given labels
    /// (case-insensitive).
    pub fn is_type(&self, labels: &[&str]) -> bool {
        let t = self.classroom_type.to_lowercase();
        labels.iter().any(|l| t == *l)
    }

    /// Whether the lowercased room type contains the given fragment.
    pub fn type_contains(&self, fragment: &str) -> bool {
        self.classroom_type.to_lowercase().contains(fragment)
    }
}
