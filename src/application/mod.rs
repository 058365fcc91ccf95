//! Application layer
//!
//! Services orchestrate domain entities through repository traits.
//! They carry all business rules so that HTTP handlers stay thin and
//! the rules remain testable with in-memory repositories.

pub mod booking;
pub mod identity;
pub mod rooms;

pub use booking::{BookingService, BookingStats};
pub use identity::IdentityService;
pub use rooms::{RoomService, RoomStats};
