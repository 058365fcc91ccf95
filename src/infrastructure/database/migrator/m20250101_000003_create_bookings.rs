//! Create bookings table
//!
//! `room_id` is intentionally not a foreign key: deleting a room keeps
//! its bookings, which then list as "Unknown Room".

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::ProjectName).string().not_null())
                    .col(ColumnDef::new(Bookings::ManagerName).string().not_null())
                    .col(ColumnDef::new(Bookings::RoomId).integer().not_null())
                    .col(ColumnDef::new(Bookings::BookingDate).string().not_null())
                    .col(ColumnDef::new(Bookings::StartTime).string().not_null())
                    .col(ColumnDef::new(Bookings::EndTime).string().not_null())
                    .col(ColumnDef::new(Bookings::BookedBy).string().not_null())
                    .col(
                        ColumnDef::new(Bookings::ApprovalStatus)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_booked_by")
                    .table(Bookings::Table)
                    .col(Bookings::BookedBy)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::ApprovalStatus)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    ProjectName,
    ManagerName,
    RoomId,
    BookingDate,
    StartTime,
    EndTime,
    BookedBy,
    ApprovalStatus,
    CreatedAt,
}
