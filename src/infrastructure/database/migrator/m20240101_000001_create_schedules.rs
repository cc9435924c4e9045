//! Create schedules table
//!
//! Bookable slots, one row per court and time window.

use sea_orm_migration::prelude::*;

use super::id_column;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(&mut id_column(manager.get_database_backend(), Schedules::Id))
                    .col(ColumnDef::new(Schedules::CourtId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Schedules::StartDateTime)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Schedules::EndDateTime)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_court_window")
                    .table(Schedules::Table)
                    .col(Schedules::CourtId)
                    .col(Schedules::StartDateTime)
                    .col(Schedules::EndDateTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Schedules {
    Table,
    Id,
    CourtId,
    StartDateTime,
    EndDateTime,
}
