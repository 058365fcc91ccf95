//! Room DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::rooms::RoomStats;
use crate::domain::Room;

/// Room API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub room_name: String,
    /// Seats; `null` when unknown
    pub capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            room_name: r.room_name,
            capacity: r.capacity,
            created_at: r.created_at,
        }
    }
}

/// Create room request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, message = "Room name is required"))]
    pub room_name: String,
    #[validate(range(min = 0, message = "Capacity cannot be negative"))]
    pub capacity: Option<i32>,
}

/// Update room request. `capacity: null` in the body clears the
/// capacity; leaving the field out keeps it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, message = "Room name cannot be empty"))]
    pub room_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub capacity: Option<Option<i32>>,
}

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, D>(de: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}

/// List rooms query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRoomsParams {
    /// Case-insensitive search over room names
    pub search: Option<String>,
}

/// Aggregate room figures
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomStatsDto {
    pub total_rooms: u64,
    pub total_capacity: i64,
    pub average_capacity: i64,
}

impl From<RoomStats> for RoomStatsDto {
    fn from(s: RoomStats) -> Self {
        Self {
            total_rooms: s.total_rooms,
            total_capacity: s.total_capacity,
            average_capacity: s.average_capacity,
        }
    }
}
