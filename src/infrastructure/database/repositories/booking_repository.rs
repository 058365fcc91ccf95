//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::{
    Booking, BookingRepository, BookingStatus, DomainError, DomainResult, NewBooking,
    UpdateBookingFields,
};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        project_name: m.project_name,
        manager_name: m.manager_name,
        room_id: m.room_id,
        booking_date: m.booking_date,
        start_time: m.start_time,
        end_time: m.end_time,
        booked_by: m.booked_by,
        approval_status: BookingStatus::from_str(&m.approval_status),
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, b: NewBooking, booked_by: &str) -> DomainResult<Booking> {
        debug!("Creating booking for {}: {}", booked_by, b.project_name);

        let model = booking::ActiveModel {
            project_name: Set(b.project_name),
            manager_name: Set(b.manager_name),
            room_id: Set(b.room_id),
            booking_date: Set(b.booking_date),
            start_time: Set(b.start_time),
            end_time: Set(b.end_time),
            booked_by: Set(booked_by.to_string()),
            approval_status: Set(BookingStatus::Pending.as_str().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, id: i32, fields: UpdateBookingFields) -> DomainResult<Option<Booking>> {
        debug!("Updating booking: {}", id);

        let existing = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: booking::ActiveModel = existing.into();
        if let Some(project_name) = fields.project_name {
            active.project_name = Set(project_name);
        }
        if let Some(manager_name) = fields.manager_name {
            active.manager_name = Set(manager_name);
        }
        if let Some(room_id) = fields.room_id {
            active.room_id = Set(room_id);
        }
        if let Some(booking_date) = fields.booking_date {
            active.booking_date = Set(booking_date);
        }
        if let Some(start_time) = fields.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = fields.end_time {
            active.end_time = Set(end_time);
        }

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn set_status(&self, id: i32, status: BookingStatus) -> DomainResult<()> {
        let existing = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: booking::ActiveModel = existing.into();
        active.approval_status = Set(status.as_str().to_string());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = booking::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
