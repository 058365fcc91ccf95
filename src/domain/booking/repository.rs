//! Booking repository interface

use async_trait::async_trait;

use super::model::{Booking, BookingStatus, NewBooking, UpdateBookingFields};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new pending booking and return it with its assigned ID.
    async fn create(&self, booking: NewBooking, booked_by: &str) -> DomainResult<Booking>;

    /// Find a booking by ID.
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    /// List all bookings, newest first.
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Apply a partial update of the booking details; returns the
    /// updated booking, or `None` if no booking with that ID exists.
    async fn update(&self, id: i32, fields: UpdateBookingFields) -> DomainResult<Option<Booking>>;

    /// Persist a status transition already validated by the domain model.
    async fn set_status(&self, id: i32, status: BookingStatus) -> DomainResult<()>;

    /// Delete a booking by ID.
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
