//! Room management service

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, NewRoom, Room, RoomRepository, UpdateRoomFields};

/// Aggregate room figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomStats {
    pub total_rooms: u64,
    pub total_capacity: i64,
    /// Mean capacity across all rooms, rounded to the nearest whole
    /// seat. 0 when there are no rooms.
    pub average_capacity: i64,
}

/// Room service. Room names are not required to be unique; two
/// buildings may each have a "Board Room".
pub struct RoomService<R: RoomRepository> {
    repo: Arc<R>,
}

impl<R: RoomRepository> RoomService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// List rooms, optionally narrowed by a case-insensitive
    /// substring search over room names.
    pub async fn list_rooms(&self, search: Option<&str>) -> DomainResult<Vec<Room>> {
        let rooms = self.repo.find_all().await?;
        let Some(needle) = search.filter(|s| !s.is_empty()).map(str::to_lowercase) else {
            return Ok(rooms);
        };
        Ok(rooms
            .into_iter()
            .filter(|r| r.room_name.to_lowercase().contains(&needle))
            .collect())
    }

    pub async fn get_room(&self, id: i32) -> DomainResult<Option<Room>> {
        self.repo.find_by_id(id).await
    }

    pub async fn create_room(&self, room: NewRoom) -> DomainResult<Room> {
        validate_room(&room.room_name, room.capacity)?;
        let created = self.repo.create(room).await?;
        info!(room_id = created.id, room_name = %created.room_name, "Room created");
        Ok(created)
    }

    pub async fn update_room(&self, id: i32, fields: UpdateRoomFields) -> DomainResult<Room> {
        if let Some(name) = &fields.room_name {
            if name.trim().is_empty() {
                return Err(DomainError::Validation("Room name is required".into()));
            }
        }
        if let Some(Some(capacity)) = fields.capacity {
            if capacity < 0 {
                return Err(DomainError::Validation(
                    "Capacity cannot be negative".into(),
                ));
            }
        }

        let updated = self
            .repo
            .update(id, fields)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: id.to_string(),
            })?;
        info!(room_id = id, "Room updated");
        Ok(updated)
    }

    /// Delete a room. Existing bookings keep their `room_id` and
    /// render as "Unknown Room" afterwards.
    pub async fn delete_room(&self, id: i32) -> DomainResult<()> {
        self.repo.delete(id).await?;
        info!(room_id = id, "Room deleted");
        Ok(())
    }

    pub async fn stats(&self) -> DomainResult<RoomStats> {
        let rooms = self.repo.find_all().await?;
        let total_rooms = rooms.len() as u64;
        let total_capacity: i64 = rooms.iter().map(|r| r.capacity_or_zero() as i64).sum();
        let average_capacity = if total_rooms == 0 {
            0
        } else {
            // Round half-up on the integer division.
            (total_capacity + total_rooms as i64 / 2) / total_rooms as i64
        };
        Ok(RoomStats {
            total_rooms,
            total_capacity,
            average_capacity,
        })
    }
}

fn validate_room(room_name: &str, capacity: Option<i32>) -> DomainResult<()> {
    if room_name.trim().is_empty() {
        return Err(DomainError::Validation("Room name is required".into()));
    }
    if let Some(capacity) = capacity {
        if capacity < 0 {
            return Err(DomainError::Validation(
                "Capacity cannot be negative".into(),
            ));
        }
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryRooms {
        rows: Mutex<Vec<Room>>,
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl RoomRepository for InMemoryRooms {
        async fn create(&self, room: NewRoom) -> DomainResult<Room> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let room = Room {
                id: *next,
                room_name: room.room_name,
                capacity: room.capacity,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(room.clone());
            Ok(room)
        }

        async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
            Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
        }

        async fn find_all(&self) -> DomainResult<Vec<Room>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn update(&self, id: i32, fields: UpdateRoomFields) -> DomainResult<Option<Room>> {
            let mut rows = self.rows.lock().unwrap();
            let Some(r) = rows.iter_mut().find(|r| r.id == id) else {
                return Ok(None);
            };
            if let Some(v) = fields.room_name {
                r.room_name = v;
            }
            if let Some(v) = fields.capacity {
                r.capacity = v;
            }
            Ok(Some(r.clone()))
        }

        async fn delete(&self, id: i32) -> DomainResult<()> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            if rows.len() == before {
                return Err(DomainError::NotFound {
                    entity: "Room",
                    field: "id",
                    value: id.to_string(),
                });
            }
            Ok(())
        }
    }

    fn test_service() -> RoomService<InMemoryRooms> {
        RoomService::new(Arc::new(InMemoryRooms::default()))
    }

    fn room(name: &str, capacity: Option<i32>) -> NewRoom {
        NewRoom {
            room_name: name.into(),
            capacity,
        }
    }

    #[tokio::test]
    async fn duplicate_room_names_are_allowed() {
        let svc = test_service();
        svc.create_room(room("Board Room", Some(8))).await.unwrap();
        svc.create_room(room("Board Room", Some(12))).await.unwrap();

        let rooms = svc.list_rooms(None).await.unwrap();
        assert_eq!(rooms.len(), 2);
    }

    #[tokio::test]
    async fn blank_name_and_negative_capacity_are_rejected() {
        let svc = test_service();
        assert!(matches!(
            svc.create_room(room("  ", Some(4))).await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            svc.create_room(room("Board Room", Some(-1))).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn capacity_can_be_cleared_on_update() {
        let svc = test_service();
        let created = svc.create_room(room("Training Room", Some(20))).await.unwrap();

        let updated = svc
            .update_room(
                created.id,
                UpdateRoomFields {
                    room_name: None,
                    capacity: Some(None),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.capacity, None);
    }

    #[tokio::test]
    async fn update_of_missing_room_is_not_found() {
        let svc = test_service();
        let err = svc
            .update_room(99, UpdateRoomFields::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn search_narrows_by_room_name() {
        let svc = test_service();
        svc.create_room(room("Conference Room A", Some(10))).await.unwrap();
        svc.create_room(room("Board Room", Some(8))).await.unwrap();

        let hits = svc.list_rooms(Some("conference")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].room_name, "Conference Room A");
    }

    #[tokio::test]
    async fn stats_treat_missing_capacity_as_zero() {
        let svc = test_service();
        svc.create_room(room("A", Some(10))).await.unwrap();
        svc.create_room(room("B", Some(5))).await.unwrap();
        svc.create_room(room("C", None)).await.unwrap();

        let stats = svc.stats().await.unwrap();
        assert_eq!(stats.total_rooms, 3);
        assert_eq!(stats.total_capacity, 15);
        assert_eq!(stats.average_capacity, 5);
    }

    #[tokio::test]
    async fn stats_on_empty_catalogue_are_zero() {
        let svc = test_service();
        let stats = svc.stats().await.unwrap();
        assert_eq!(
            stats,
            RoomStats {
                total_rooms: 0,
                total_capacity: 0,
                average_capacity: 0,
            }
        );
    }
}
