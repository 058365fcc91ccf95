//! Booking domain entity and approval lifecycle
//!
//! The approval status moves `pending -> approved` or `pending -> rejected`
//! and nowhere else; both transitions are admin actions. There is no way
//! back to `pending`.

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// Booking approval status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Awaiting an admin decision (initial state)
    Pending,
    /// Approved by an admin (terminal)
    Approved,
    /// Rejected by an admin (terminal)
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Lenient parse used when reading stored rows: a missing or
    /// unrecognised status is displayed as pending.
    pub fn from_str(s: &str) -> Self {
        match s {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }

    /// Strict parse for filter parameters, where a typo must not
    /// silently turn into a pending filter.
    pub fn parse_strict(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A room reservation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: i32,
    pub project_name: String,
    pub manager_name: String,
    /// References a `Room`; the room may have been deleted since.
    pub room_id: i32,
    /// Calendar date, e.g. "2024-01-25"
    pub booking_date: String,
    /// Start of the slot, e.g. "09:00"
    pub start_time: String,
    /// End of the slot, e.g. "10:00"
    pub end_time: String,
    /// Email of the creator; the ownership check for non-admins.
    pub booked_by: String,
    pub approval_status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Approve this booking. Only a pending booking can be approved.
    pub fn approve(&mut self) -> DomainResult<()> {
        self.transition(BookingStatus::Approved)
    }

    /// Reject this booking. Only a pending booking can be rejected.
    pub fn reject(&mut self) -> DomainResult<()> {
        self.transition(BookingStatus::Rejected)
    }

    fn transition(&mut self, to: BookingStatus) -> DomainResult<()> {
        if self.approval_status != BookingStatus::Pending {
            return Err(DomainError::Conflict(format!(
                "Booking {} is already {}",
                self.id, self.approval_status
            )));
        }
        self.approval_status = to;
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        self.approval_status == BookingStatus::Pending
    }
}

/// Fields for creating a booking. The status is not part of this
/// struct: a new booking is always pending, and `booked_by` is taken
/// from the authenticated caller rather than the payload.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub project_name: String,
    pub manager_name: String,
    pub room_id: i32,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
}

/// Partial update of a booking's details. The approval status cannot
/// be changed here; only the approve/reject operations move it.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookingFields {
    pub project_name: Option<String>,
    pub manager_name: Option<String>,
    pub room_id: Option<i32>,
    pub booking_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking(status: BookingStatus) -> Booking {
        Booking {
            id: 1,
            project_name: "Q4 Planning".into(),
            manager_name: "John Smith".into(),
            room_id: 1,
            booking_date: "2024-01-25".into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            booked_by: "alice@company.com".into(),
            approval_status: status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn pending_can_be_approved() {
        let mut b = sample_booking(BookingStatus::Pending);
        b.approve().unwrap();
        assert_eq!(b.approval_status, BookingStatus::Approved);
    }

    #[test]
    fn pending_can_be_rejected() {
        let mut b = sample_booking(BookingStatus::Pending);
        b.reject().unwrap();
        assert_eq!(b.approval_status, BookingStatus::Rejected);
    }

    #[test]
    fn approved_is_terminal() {
        let mut b = sample_booking(BookingStatus::Approved);
        assert!(b.approve().is_err());
        assert!(b.reject().is_err());
        assert_eq!(b.approval_status, BookingStatus::Approved);
    }

    #[test]
    fn rejected_is_terminal() {
        let mut b = sample_booking(BookingStatus::Rejected);
        assert!(b.approve().is_err());
        assert!(b.reject().is_err());
        assert_eq!(b.approval_status, BookingStatus::Rejected);
    }

    #[test]
    fn status_string_roundtrip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Approved,
            BookingStatus::Rejected,
        ] {
            assert_eq!(BookingStatus::from_str(status.as_str()), status);
            assert_eq!(BookingStatus::parse_strict(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_displays_as_pending() {
        assert_eq!(BookingStatus::from_str(""), BookingStatus::Pending);
        assert_eq!(BookingStatus::from_str("Confirmed"), BookingStatus::Pending);
    }

    #[test]
    fn strict_parse_refuses_unknown_status() {
        assert_eq!(BookingStatus::parse_strict("all"), None);
        assert_eq!(BookingStatus::parse_strict("Pending"), None);
    }
}
