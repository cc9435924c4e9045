//! Create reservations table
//!
//! Money columns hold minor units (cents). `previous_reservation_id` links a
//! rescheduled booking to the one it replaced.

use sea_orm_migration::prelude::*;

use super::id_column;
use super::m20240101_000001_create_schedules::Schedules;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(&mut id_column(manager.get_database_backend(), Reservations::Id))
                    .col(ColumnDef::new(Reservations::GuestId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Reservations::ScheduleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::ValueCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Reservations::RefundValueCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("READY_TO_PLAY"),
                    )
                    .col(ColumnDef::new(Reservations::PreviousReservationId).big_integer())
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_schedule")
                            .from(Reservations::Table, Reservations::ScheduleId)
                            .to(Schedules::Table, Schedules::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_previous")
                            .from(Reservations::Table, Reservations::PreviousReservationId)
                            .to(Reservations::Table, Reservations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_schedule")
                    .table(Reservations::Table)
                    .col(Reservations::ScheduleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_status")
                    .table(Reservations::Table)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_created_at")
                    .table(Reservations::Table)
                    .col(Reservations::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    GuestId,
    ScheduleId,
    ValueCents,
    RefundValueCents,
    Status,
    PreviousReservationId,
    CreatedAt,
}
