//! Schedule service

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::info;

use super::finish;
use crate::domain::{DomainError, DomainResult, NewSchedule, Schedule, UnitOfWork};

/// Service for court slot management
pub struct ScheduleService {
    uow: Arc<dyn UnitOfWork>,
}

impl ScheduleService {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    pub async fn add_schedule(&self, schedule: NewSchedule) -> DomainResult<Schedule> {
        schedule.validate()?;

        let scope = self.uow.begin().await?;
        let result = scope.schedules().save(schedule).await;
        let saved = finish(scope, result).await?;

        info!(
            schedule_id = saved.id,
            court_id = saved.court_id,
            start = %saved.start_date_time,
            "Schedule added"
        );
        Ok(saved)
    }

    pub async fn find_schedule(&self, schedule_id: i64) -> DomainResult<Schedule> {
        let scope = self.uow.begin().await?;
        let result = scope
            .schedules()
            .find_by_id(schedule_id)
            .await
            .and_then(|found| found.ok_or_else(|| DomainError::not_found("Schedule", schedule_id)));
        finish(scope, result).await
    }

    /// Slots lying fully within `[start, end]`, earliest first
    pub async fn find_schedules_by_dates(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Schedule>> {
        let scope = self.uow.begin().await?;
        let result = scope.schedules().find_in_range(start, end).await;
        finish(scope, result).await
    }
}
