//! SeaORM implementation of ScheduleRepository

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::unit_of_work::SeaOrmTransactionScope;
use crate::domain::{DomainResult, NewSchedule, Schedule, ScheduleRepository};
use crate::infrastructure::database::entities::schedule;

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn model_to_domain(m: schedule::Model) -> Schedule {
    Schedule {
        id: m.id,
        court_id: m.court_id,
        start_date_time: m.start_date_time,
        end_date_time: m.end_date_time,
    }
}

// ── ScheduleRepository impl ─────────────────────────────────────

#[async_trait]
impl ScheduleRepository for SeaOrmTransactionScope {
    async fn save(&self, s: NewSchedule) -> DomainResult<Schedule> {
        debug!("Saving schedule for court {}", s.court_id);

        let model = schedule::ActiveModel {
            id: NotSet,
            court_id: Set(s.court_id),
            start_date_time: Set(s.start_date_time),
            end_date_time: Set(s.end_date_time),
        };
        let inserted = model.insert(&self.txn).await?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Schedule>> {
        let model = schedule::Entity::find_by_id(id).one(&self.txn).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Schedule>> {
        let models = schedule::Entity::find()
            .filter(schedule::Column::StartDateTime.gte(start))
            .filter(schedule::Column::EndDateTime.lte(end))
            .order_by_asc(schedule::Column::StartDateTime)
            .order_by_asc(schedule::Column::Id)
            .all(&self.txn)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
