//! Core business entities, status types and repository traits.

pub mod booking;
pub mod error;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingRepository, BookingStatus, NewBooking, UpdateBookingFields};
pub use error::{DomainError, DomainResult};
pub use room::{NewRoom, Room, RoomRepository, UpdateRoomFields};
pub use user::{Caller, NewUser, UpdateUserFields, User, UserRepository};
