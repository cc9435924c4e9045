//! Schedule repository interface

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::model::{NewSchedule, Schedule};
use crate::domain::DomainResult;

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Persist a new schedule, assigning its ID
    async fn save(&self, schedule: NewSchedule) -> DomainResult<Schedule>;

    /// Find schedule by ID
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Schedule>>;

    /// Schedules whose start and end both fall within `[start, end]`,
    /// ordered by start time then ID
    async fn find_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Schedule>>;
}
