//! Room repository interface

use async_trait::async_trait;

use super::model::{NewRoom, Room, UpdateRoomFields};
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a new room and return it with its assigned ID.
    async fn create(&self, room: NewRoom) -> DomainResult<Room>;

    /// Find a room by ID.
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    /// List all rooms, newest first.
    async fn find_all(&self) -> DomainResult<Vec<Room>>;

    /// Apply a partial update; returns the updated room, or `None`
    /// if no room with that ID exists.
    async fn update(&self, id: i32, fields: UpdateRoomFields) -> DomainResult<Option<Room>>;

    /// Delete a room by ID. Bookings referencing it are kept and
    /// render as "Unknown Room".
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
