//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub guest_id: i64,
    pub schedule_id: i64,

    /// Charged amount in minor units (cents)
    pub value_cents: i64,

    /// Refunded amount in minor units, may be negative
    pub refund_value_cents: i64,

    /// Reservation status: READY_TO_PLAY, CANCELLED, RESCHEDULED
    pub status: String,

    #[sea_orm(nullable)]
    pub previous_reservation_id: Option<i64>,

    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schedule::Entity",
        from = "Column::ScheduleId",
        to = "super::schedule::Column::Id"
    )]
    Schedule,
}

impl Related<super::schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
