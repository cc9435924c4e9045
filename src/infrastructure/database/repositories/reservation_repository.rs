//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use super::schedule_repository;
use super::unit_of_work::SeaOrmTransactionScope;
use crate::domain::{
    DomainError, DomainResult, Reservation, ReservationRepository, ReservationStatus,
};
use crate::infrastructure::database::entities::{reservation, schedule};
use crate::shared::errors::InfraError;
use crate::shared::types::{PaginatedResult, PaginationParams};

// ── Conversion helpers ──────────────────────────────────────────

fn to_cents(amount: Decimal) -> DomainResult<i64> {
    (amount * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| InfraError::CorruptRecord(format!("amount out of range: {}", amount)).into())
}

fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn model_to_domain(
    m: reservation::Model,
    s: Option<schedule::Model>,
) -> DomainResult<Reservation> {
    let schedule = s.ok_or_else(|| {
        InfraError::CorruptRecord(format!(
            "reservation {} references missing schedule {}",
            m.id, m.schedule_id
        ))
    })?;
    let status = ReservationStatus::parse(&m.status).ok_or_else(|| {
        InfraError::CorruptRecord(format!(
            "reservation {} has unknown status {}",
            m.id, m.status
        ))
    })?;

    Ok(Reservation {
        id: m.id,
        guest_id: m.guest_id,
        schedule: schedule_repository::model_to_domain(schedule),
        value: from_cents(m.value_cents),
        refund_value: from_cents(m.refund_value_cents),
        status,
        previous_reservation_id: m.previous_reservation_id,
        created_at: m.created_at,
    })
}

fn to_active_model(r: &Reservation) -> DomainResult<reservation::ActiveModel> {
    Ok(reservation::ActiveModel {
        id: if r.id == 0 { NotSet } else { Set(r.id) },
        guest_id: Set(r.guest_id),
        schedule_id: Set(r.schedule.id),
        value_cents: Set(to_cents(r.value)?),
        refund_value_cents: Set(to_cents(r.refund_value)?),
        status: Set(r.status.as_str().to_string()),
        previous_reservation_id: Set(r.previous_reservation_id),
        created_at: Set(r.created_at),
    })
}

/// Reservations in `status` whose schedule lies within `[start, end]`
fn in_window(
    status: ReservationStatus,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> sea_orm::SelectTwo<reservation::Entity, schedule::Entity> {
    reservation::Entity::find()
        .find_also_related(schedule::Entity)
        .filter(reservation::Column::Status.eq(status.as_str()))
        .filter(schedule::Column::StartDateTime.gte(start))
        .filter(schedule::Column::EndDateTime.lte(end))
        .order_by_asc(reservation::Column::Id)
}

fn created_between(start: NaiveDateTime, end: NaiveDateTime) -> Select<reservation::Entity> {
    reservation::Entity::find()
        .filter(reservation::Column::CreatedAt.between(start, end))
        .order_by_asc(reservation::Column::CreatedAt)
        .order_by_asc(reservation::Column::Id)
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmTransactionScope {
    async fn save(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!(
            "Saving reservation: guest {} schedule {}",
            r.guest_id, r.schedule.id
        );

        let mut model = to_active_model(&r)?;
        model.id = NotSet;
        let inserted = model.insert(&self.txn).await?;
        Ok(Reservation { id: inserted.id, ..r })
    }

    async fn update(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!("Updating reservation: {}", r.id);

        let existing = reservation::Entity::find_by_id(r.id).one(&self.txn).await?;
        if existing.is_none() {
            return Err(DomainError::not_found("Reservation", r.id));
        }

        to_active_model(&r)?.update(&self.txn).await?;
        Ok(r)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        let row = reservation::Entity::find_by_id(id)
            .find_also_related(schedule::Entity)
            .one(&self.txn)
            .await?;
        row.map(|(r, s)| model_to_domain(r, s)).transpose()
    }

    async fn find_conflicting(
        &self,
        status: ReservationStatus,
        court_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Reservation>> {
        let rows = in_window(status, start, end)
            .filter(schedule::Column::CourtId.eq(court_id))
            .all(&self.txn)
            .await?;
        rows.into_iter()
            .map(|(r, s)| model_to_domain(r, s))
            .collect()
    }

    async fn find_by_status_in_range(
        &self,
        status: ReservationStatus,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Reservation>> {
        let rows = in_window(status, start, end).all(&self.txn).await?;
        rows.into_iter()
            .map(|(r, s)| model_to_domain(r, s))
            .collect()
    }

    async fn find_by_created_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Reservation>> {
        let total = created_between(start, end).count(&self.txn).await?;
        let rows = created_between(start, end)
            .find_also_related(schedule::Entity)
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.txn)
            .await?;
        let items = rows
            .into_iter()
            .map(|(r, s)| model_to_domain(r, s))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }
}

// ── Tests ──────────────────────────────────────────────────────
