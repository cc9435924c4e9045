//! Schedule DTOs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::{NewSchedule, Schedule};

/// Court slot in API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleDto {
    pub id: i64,
    pub court_id: i64,
    /// Local wall-clock time, e.g. `2030-05-10T18:00:00`
    pub start_date_time: NaiveDateTime,
    pub end_date_time: NaiveDateTime,
}

impl From<Schedule> for ScheduleDto {
    fn from(s: Schedule) -> Self {
        Self {
            id: s.id,
            court_id: s.court_id,
            start_date_time: s.start_date_time,
            end_date_time: s.end_date_time,
        }
    }
}

/// Request to open a new slot on a court
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_window"))]
pub struct CreateScheduleRequest {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub court_id: i64,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: NaiveDateTime,
}

fn validate_window(req: &CreateScheduleRequest) -> Result<(), ValidationError> {
    if req.end_date_time <= req.start_date_time {
        let mut err = ValidationError::new("window");
        err.message = Some("end_date_time must be after start_date_time".into());
        return Err(err);
    }
    Ok(())
}

impl From<CreateScheduleRequest> for NewSchedule {
    fn from(r: CreateScheduleRequest) -> Self {
        Self {
            court_id: r.court_id,
            start_date_time: r.start_date_time,
            end_date_time: r.end_date_time,
        }
    }
}
