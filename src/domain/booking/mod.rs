//! Booking domain entity, approval lifecycle and repository interface

mod model;
mod repository;

pub use model::{Booking, BookingStatus, NewBooking, UpdateBookingFields};
pub use repository::BookingRepository;
