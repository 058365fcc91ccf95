//! Booking use-cases: lifecycle, authorization and list filtering

pub mod filter;
pub mod service;

pub use filter::{filter_bookings, BookingQuery, BookingWithRoom, UNKNOWN_ROOM};
pub use service::{BookingService, BookingStats};
