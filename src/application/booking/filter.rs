//! Booking list filtering
//!
//! A booking list is always fetched in full and narrowed by three
//! independent predicates: ownership (non-admins only ever see their
//! own bookings), a case-insensitive substring search over project,
//! room and manager names, and an approval-status filter. The
//! predicates are an AND; application order does not matter.

use crate::domain::{Booking, BookingStatus, Caller};

/// Room name shown for bookings whose room has been deleted.
pub const UNKNOWN_ROOM: &str = "Unknown Room";

/// A booking together with its resolved room name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWithRoom {
    pub booking: Booking,
    pub room_name: String,
}

/// Filter parameters for a booking list request.
#[derive(Debug, Clone, Default)]
pub struct BookingQuery {
    /// Case-insensitive substring over project, room and manager names.
    pub search: Option<String>,
    /// Keep only bookings in this status; `None` means all statuses.
    pub status: Option<BookingStatus>,
}

/// Narrow `items` down to what `caller` is allowed and asked to see.
pub fn filter_bookings(
    items: Vec<BookingWithRoom>,
    query: &BookingQuery,
    caller: &Caller,
) -> Vec<BookingWithRoom> {
    let needle = query
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    items
        .into_iter()
        .filter(|item| caller.is_admin || caller.owns(&item.booking.booked_by))
        .filter(|item| match &needle {
            Some(needle) => {
                item.booking.project_name.to_lowercase().contains(needle)
                    || item.room_name.to_lowercase().contains(needle)
                    || item.booking.manager_name.to_lowercase().contains(needle)
            }
            None => true,
        })
        .filter(|item| match query.status {
            Some(status) => item.booking.approval_status == status,
            None => true,
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────
