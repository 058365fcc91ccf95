//! Booking service
//!
//! Owns the booking lifecycle and every authorization decision that
//! depends on who is asking. HTTP handlers are thin wrappers that pass
//! in the authenticated `Caller`; nothing here trusts a client-supplied
//! role flag.

use std::sync::Arc;

use tracing::info;

use super::filter::{filter_bookings, BookingQuery, BookingWithRoom, UNKNOWN_ROOM};
use crate::domain::{
    Booking, BookingRepository, BookingStatus, Caller, DomainError, DomainResult, NewBooking,
    RoomRepository, UpdateBookingFields,
};

/// Counters for the dashboard stat cards. For non-admin callers the
/// booking counts cover only their own bookings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingStats {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub total: u64,
    pub total_rooms: u64,
}

pub struct BookingService<B: BookingRepository, R: RoomRepository> {
    bookings: Arc<B>,
    rooms: Arc<R>,
}

impl<B: BookingRepository, R: RoomRepository> BookingService<B, R> {
    pub fn new(bookings: Arc<B>, rooms: Arc<R>) -> Self {
        Self { bookings, rooms }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// List bookings visible to `caller`, narrowed by `query`.
    /// Room names are resolved against the current room list; a booking
    /// whose room has been deleted lists as "Unknown Room".
    pub async fn list(&self, caller: &Caller, query: &BookingQuery) -> DomainResult<Vec<BookingWithRoom>> {
        let bookings = self.bookings.find_all().await?;
        let items = self.resolve_room_names(bookings).await?;
        Ok(filter_bookings(items, query, caller))
    }

    /// Fetch a single booking. Non-admins may only read their own.
    pub async fn get(&self, caller: &Caller, id: i32) -> DomainResult<BookingWithRoom> {
        let booking = self.find_existing(id).await?;

        if !caller.is_admin && !caller.owns(&booking.booked_by) {
            return Err(DomainError::Forbidden(
                "You may only view your own bookings".into(),
            ));
        }

        let room_name = match self.rooms.find_by_id(booking.room_id).await? {
            Some(room) => room.room_name,
            None => UNKNOWN_ROOM.to_string(),
        };
        Ok(BookingWithRoom { booking, room_name })
    }

    /// Booking counters for the dashboard, scoped to the caller.
    pub async fn stats(&self, caller: &Caller) -> DomainResult<BookingStats> {
        let visible = self.list(caller, &BookingQuery::default()).await?;
        let count = |status: BookingStatus| {
            visible
                .iter()
                .filter(|b| b.booking.approval_status == status)
                .count() as u64
        };

        Ok(BookingStats {
            pending: count(BookingStatus::Pending),
            approved: count(BookingStatus::Approved),
            rejected: count(BookingStatus::Rejected),
            total: visible.len() as u64,
            total_rooms: self.rooms.find_all().await?.len() as u64,
        })
    }

    // ── Commands ────────────────────────────────────────────────

    /// Create a booking. It always starts out pending; `booked_by` is
    /// the caller's email. Overlapping bookings for the same room and
    /// slot are allowed; the approval step is the arbitration point.
    pub async fn create(&self, caller: &Caller, new: NewBooking) -> DomainResult<Booking> {
        if self.rooms.find_by_id(new.room_id).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "Room {} does not exist",
                new.room_id
            )));
        }

        let booking = self.bookings.create(new, &caller.email).await?;
        info!(booking_id = booking.id, booked_by = %caller.email, "Booking created");
        Ok(booking)
    }

    /// Update a booking's details. Admins may edit any booking; a
    /// non-admin only their own, and only while it is still pending.
    /// The approval status is never touched here.
    pub async fn update(
        &self,
        caller: &Caller,
        id: i32,
        fields: UpdateBookingFields,
    ) -> DomainResult<Booking> {
        let existing = self.find_existing(id).await?;
        self.authorize_mutation(caller, &existing, "edit")?;

        if let Some(room_id) = fields.room_id {
            if self.rooms.find_by_id(room_id).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "Room {} does not exist",
                    room_id
                )));
            }
        }

        self.bookings
            .update(id, fields)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            })
    }

    /// Approve a pending booking. Admin only.
    pub async fn approve(&self, caller: &Caller, id: i32) -> DomainResult<Booking> {
        self.decide(caller, id, BookingStatus::Approved).await
    }

    /// Reject a pending booking. Admin only.
    pub async fn reject(&self, caller: &Caller, id: i32) -> DomainResult<Booking> {
        self.decide(caller, id, BookingStatus::Rejected).await
    }

    /// Delete a booking. Admins may delete anything; a non-admin only
    /// their own pending bookings.
    pub async fn delete(&self, caller: &Caller, id: i32) -> DomainResult<()> {
        let existing = self.find_existing(id).await?;
        self.authorize_mutation(caller, &existing, "delete")?;

        self.bookings.delete(id).await?;
        info!(booking_id = id, by = %caller.email, "Booking deleted");
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn decide(&self, caller: &Caller, id: i32, to: BookingStatus) -> DomainResult<Booking> {
        if !caller.is_admin {
            return Err(DomainError::Forbidden(
                "Only administrators may approve or reject bookings".into(),
            ));
        }

        let mut booking = self.find_existing(id).await?;
        // The domain model guards the pending-only transition.
        match to {
            BookingStatus::Approved => booking.approve()?,
            BookingStatus::Rejected => booking.reject()?,
            BookingStatus::Pending => unreachable!("no transition back to pending"),
        }

        self.bookings.set_status(id, to).await?;
        info!(booking_id = id, status = %to, by = %caller.email, "Booking decided");
        Ok(booking)
    }

    fn authorize_mutation(
        &self,
        caller: &Caller,
        booking: &Booking,
        action: &str,
    ) -> DomainResult<()> {
        if caller.is_admin {
            return Ok(());
        }
        if !caller.owns(&booking.booked_by) {
            return Err(DomainError::Forbidden(format!(
                "You may only {} your own bookings",
                action
            )));
        }
        if !booking.is_pending() {
            return Err(DomainError::Forbidden(format!(
                "Only pending bookings can be {}ed",
                action
            )));
        }
        Ok(())
    }

    async fn find_existing(&self, id: i32) -> DomainResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            })
    }

    async fn resolve_room_names(&self, bookings: Vec<Booking>) -> DomainResult<Vec<BookingWithRoom>> {
        let rooms = self.rooms.find_all().await?;
        Ok(bookings
            .into_iter()
            .map(|booking| {
                let room_name = rooms
                    .iter()
                    .find(|r| r.id == booking.room_id)
                    .map(|r| r.room_name.clone())
                    .unwrap_or_else(|| UNKNOWN_ROOM.to_string());
                BookingWithRoom { booking, room_name }
            })
            .collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewRoom, Room, UpdateRoomFields};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    // In-memory doubles mirroring the SeaORM repositories.

    #[derive(Default)]
    struct InMemoryBookings {
        rows: Mutex<Vec<Booking>>,
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl BookingRepository for InMemoryBookings {
        async fn create(&self, b: NewBooking, booked_by: &str) -> DomainResult<Booking> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let booking = Booking {
                id: *next,
                project_name: b.project_name,
                manager_name: b.manager_name,
                room_id: b.room_id,
                booking_date: b.booking_date,
                start_time: b.start_time,
                end_time: b.end_time,
                booked_by: booked_by.to_string(),
                approval_status: BookingStatus::Pending,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(booking.clone());
            Ok(booking)
        }

        async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
            Ok(self.rows.lock().unwrap().iter().find(|b| b.id == id).cloned())
        }

        async fn find_all(&self) -> DomainResult<Vec<Booking>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn update(
            &self,
            id: i32,
            fields: UpdateBookingFields,
        ) -> DomainResult<Option<Booking>> {
            let mut rows = self.rows.lock().unwrap();
            let Some(b) = rows.iter_mut().find(|b| b.id == id) else {
                return Ok(None);
            };
            if let Some(v) = fields.project_name {
                b.project_name = v;
            }
            if let Some(v) = fields.manager_name {
                b.manager_name = v;
            }
            if let Some(v) = fields.room_id {
                b.room_id = v;
            }
            if let Some(v) = fields.booking_date {
                b.booking_date = v;
            }
            if let Some(v) = fields.start_time {
                b.start_time = v;
            }
            if let Some(v) = fields.end_time {
                b.end_time = v;
            }
            Ok(Some(b.clone()))
        }

        async fn set_status(&self, id: i32, status: BookingStatus) -> DomainResult<()> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|b| b.id == id) {
                Some(b) => {
                    b.approval_status = status;
                    Ok(())
                }
                None => Err(DomainError::NotFound {
                    entity: "Booking",
                    field: "id",
                    value: id.to_string(),
                }),
            }
        }

        async fn delete(&self, id: i32) -> DomainResult<()> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|b| b.id != id);
            if rows.len() == before {
                return Err(DomainError::NotFound {
                    entity: "Booking",
                    field: "id",
                    value: id.to_string(),
                });
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct InMemoryRooms {
        rows: Mutex<Vec<Room>>,
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl RoomRepository for InMemoryRooms {
        async fn create(&self, r: NewRoom) -> DomainResult<Room> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let room = Room {
                id: *next,
                room_name: r.room_name,
                capacity: r.capacity,
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
            self.rows.lock().unwrap().retain(|r| r.id != id);
            Ok(())
        }
    }

    fn admin() -> Caller {
        Caller::new(1, "admin@company.com", true)
    }

    fn alice() -> Caller {
        Caller::new(2, "alice@company.com", false)
    }

    fn bob() -> Caller {
        Caller::new(3, "bob@company.com", false)
    }

    fn new_booking(room_id: i32) -> NewBooking {
        NewBooking {
            project_name: "Q4 Planning".into(),
            manager_name: "John Smith".into(),
            room_id,
            booking_date: "2024-01-25".into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
        }
    }

    async fn service_with_room() -> BookingService<InMemoryBookings, InMemoryRooms> {
        let rooms = Arc::new(InMemoryRooms::default());
        rooms
            .create(NewRoom {
                room_name: "Conference Room A".into(),
                capacity: Some(10),
            })
            .await
            .unwrap();
        BookingService::new(Arc::new(InMemoryBookings::default()), rooms)
    }

    #[tokio::test]
    async fn created_booking_is_pending_and_owned_by_caller() {
        let svc = service_with_room().await;
        let b = svc.create(&alice(), new_booking(1)).await.unwrap();
        assert_eq!(b.approval_status, BookingStatus::Pending);
        assert_eq!(b.booked_by, "alice@company.com");
    }

    #[tokio::test]
    async fn create_rejects_missing_room() {
        let svc = service_with_room().await;
        let err = svc.create(&alice(), new_booking(99)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn only_admin_can_approve() {
        let svc = service_with_room().await;
        let b = svc.create(&alice(), new_booking(1)).await.unwrap();

        let err = svc.approve(&alice(), b.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let approved = svc.approve(&admin(), b.id).await.unwrap();
        assert_eq!(approved.approval_status, BookingStatus::Approved);
    }

    #[tokio::test]
    async fn approve_is_guarded_against_non_pending() {
        let svc = service_with_room().await;
        let b = svc.create(&alice(), new_booking(1)).await.unwrap();
        svc.reject(&admin(), b.id).await.unwrap();

        let err = svc.approve(&admin(), b.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Status stays rejected.
        let fetched = svc.get(&admin(), b.id).await.unwrap();
        assert_eq!(fetched.booking.approval_status, BookingStatus::Rejected);
    }

    #[tokio::test]
    async fn owner_can_edit_and_delete_while_pending() {
        let svc = service_with_room().await;
        let b = svc.create(&alice(), new_booking(1)).await.unwrap();

        let updated = svc
            .update(
                &alice(),
                b.id,
                UpdateBookingFields {
                    project_name: Some("Q1 Planning".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.project_name, "Q1 Planning");

        svc.delete(&alice(), b.id).await.unwrap();
    }

    #[tokio::test]
    async fn non_owner_cannot_touch_foreign_booking() {
        let svc = service_with_room().await;
        let b = svc.create(&alice(), new_booking(1)).await.unwrap();

        assert!(matches!(
            svc.update(&bob(), b.id, UpdateBookingFields::default())
                .await
                .unwrap_err(),
            DomainError::Forbidden(_)
        ));
        assert!(matches!(
            svc.delete(&bob(), b.id).await.unwrap_err(),
            DomainError::Forbidden(_)
        ));
        assert!(matches!(
            svc.get(&bob(), b.id).await.unwrap_err(),
            DomainError::Forbidden(_)
        ));
    }

    #[tokio::test]
    async fn owner_loses_edit_and_delete_once_decided() {
        let svc = service_with_room().await;
        let b = svc.create(&alice(), new_booking(1)).await.unwrap();
        svc.approve(&admin(), b.id).await.unwrap();

        assert!(matches!(
            svc.update(&alice(), b.id, UpdateBookingFields::default())
                .await
                .unwrap_err(),
            DomainError::Forbidden(_)
        ));
        assert!(matches!(
            svc.delete(&alice(), b.id).await.unwrap_err(),
            DomainError::Forbidden(_)
        ));

        // Admin may still delete.
        svc.delete(&admin(), b.id).await.unwrap();
    }

    #[tokio::test]
    async fn deleted_room_lists_as_unknown() {
        let svc = service_with_room().await;
        svc.create(&alice(), new_booking(1)).await.unwrap();
        svc.rooms.delete(1).await.unwrap();

        let list = svc.list(&alice(), &BookingQuery::default()).await.unwrap();
        assert_eq!(list[0].room_name, UNKNOWN_ROOM);
    }

    #[tokio::test]
    async fn stats_are_scoped_to_caller() {
        let svc = service_with_room().await;
        let b1 = svc.create(&alice(), new_booking(1)).await.unwrap();
        svc.create(&bob(), new_booking(1)).await.unwrap();
        svc.approve(&admin(), b1.id).await.unwrap();

        let all = svc.stats(&admin()).await.unwrap();
        assert_eq!((all.pending, all.approved, all.total), (1, 1, 2));
        assert_eq!(all.total_rooms, 1);

        let own = svc.stats(&bob()).await.unwrap();
        assert_eq!((own.pending, own.approved, own.total), (1, 0, 1));
    }
}
