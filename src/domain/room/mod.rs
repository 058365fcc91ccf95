//! Room domain entity and repository interface

mod model;
mod repository;

pub use model::{NewRoom, Room, UpdateRoomFields};
pub use repository::RoomRepository;
