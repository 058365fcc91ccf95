//! Room domain entity

use chrono::{DateTime, Utc};

/// A bookable conference room.
///
/// Capacity is optional: rooms imported from older data may not carry
/// one, and aggregate stats treat a missing capacity as 0. Room names
/// are deliberately not unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: i32,
    pub room_name: String,
    pub capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Capacity for display and aggregation, defaulting to 0.
    pub fn capacity_or_zero(&self) -> i32 {
        self.capacity.unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct NewRoom {
    pub room_name: String,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRoomFields {
    pub room_name: Option<String>,
    pub capacity: Option<Option<i32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_capacity_counts_as_zero() {
        let room = Room {
            id: 1,
            room_name: "Board Room".into(),
            capacity: None,
            created_at: Utc::now(),
        };
        assert_eq!(room.capacity_or_zero(), 0);
    }

    #[test]
    fn capacity_passes_through() {
        let room = Room {
            id: 2,
            room_name: "Training Room".into(),
            capacity: Some(20),
            created_at: Utc::now(),
        };
        assert_eq!(room.capacity_or_zero(), 20);
    }
}
