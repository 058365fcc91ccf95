//! Booking DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::booking::{BookingStats, BookingWithRoom};

/// Booking API representation with the room name resolved.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub project_name: String,
    pub manager_name: String,
    pub room_id: i32,
    /// "Unknown Room" when the room has been deleted
    pub room_name: String,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub booked_by: String,
    pub approval_status: String,
    pub created_at: DateTime<Utc>,
}

impl From<BookingWithRoom> for BookingDto {
    fn from(item: BookingWithRoom) -> Self {
        let b = item.booking;
        Self {
            id: b.id,
            project_name: b.project_name,
            manager_name: b.manager_name,
            room_id: b.room_id,
            room_name: item.room_name,
            booking_date: b.booking_date,
            start_time: b.start_time,
            end_time: b.end_time,
            booked_by: b.booked_by,
            approval_status: b.approval_status.as_str().to_string(),
            created_at: b.created_at,
        }
    }
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, message = "Project name is required"))]
    pub project_name: String,
    #[validate(length(min = 1, message = "Manager name is required"))]
    pub manager_name: String,
    pub room_id: i32,
    #[validate(length(min = 1, message = "Booking date is required"))]
    pub booking_date: String,
    #[validate(length(min = 1, message = "Start time is required"))]
    pub start_time: String,
    #[validate(length(min = 1, message = "End time is required"))]
    pub end_time: String,
}

/// Update booking request. Absent fields are left unchanged. The
/// approval status is not editable here; use the approve and reject
/// endpoints.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingRequest {
    #[validate(length(min = 1, message = "Project name cannot be empty"))]
    pub project_name: Option<String>,
    #[validate(length(min = 1, message = "Manager name cannot be empty"))]
    pub manager_name: Option<String>,
    pub room_id: Option<i32>,
    #[validate(length(min = 1, message = "Booking date cannot be empty"))]
    pub booking_date: Option<String>,
    #[validate(length(min = 1, message = "Start time cannot be empty"))]
    pub start_time: Option<String>,
    #[validate(length(min = 1, message = "End time cannot be empty"))]
    pub end_time: Option<String>,
}

/// List bookings query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBookingsParams {
    /// Case-insensitive search over project, room and manager names
    pub search: Option<String>,
    /// `pending`, `approved`, `rejected` or `all` (default)
    pub status: Option<String>,
}

/// Dashboard counters, scoped to the caller for non-admins
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingStatsDto {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub total: u64,
    pub total_rooms: u64,
}

impl From<BookingStats> for BookingStatsDto {
    fn from(s: BookingStats) -> Self {
        Self {
            pending: s.pending,
            approved: s.approved,
            rejected: s.rejected,
            total: s.total,
            total_rooms: s.total_rooms,
        }
    }
}
