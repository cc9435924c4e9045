//! Reservation DTOs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Reservation;
use crate::interfaces::http::modules::schedules::ScheduleDto;

/// Request to book a slot
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub guest_id: i64,
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub schedule_id: i64,
}

/// Reservation details in API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i64,
    pub guest_id: i64,
    pub schedule: ScheduleDto,
    /// Amount charged, net of any refund
    #[schema(value_type = String, example = "20")]
    pub value: Decimal,
    /// Amount returned on cancel/reschedule, may be negative
    #[schema(value_type = String, example = "0")]
    pub refund_value: Decimal,
    /// `READY_TO_PLAY`, `CANCELLED` or `RESCHEDULED`
    pub reservation_status: String,
    /// Reservation this one replaced, when created by rescheduling
    pub previous_reservation_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            guest_id: r.guest_id,
            schedule: r.schedule.into(),
            value: r.value,
            refund_value: r.refund_value,
            reservation_status: r.status.as_str().to_string(),
            previous_reservation_id: r.previous_reservation_id,
            created_at: r.created_at,
        }
    }
}
