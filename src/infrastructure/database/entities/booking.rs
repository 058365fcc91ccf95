//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub project_name: String,
    pub manager_name: String,

    /// No enforced referential integrity: the room may be deleted
    /// while bookings referencing it remain.
    pub room_id: i32,

    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,

    /// Creator email; the ownership key for non-admin access.
    pub booked_by: String,

    /// Approval status: pending, approved, rejected
    pub approval_status: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
