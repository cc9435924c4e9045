//! Reservation service: booking, cancellation and rescheduling
//!
//! Every public operation runs in its own transaction scope. Helpers that
//! take a `&dyn TransactionScope` never commit; rescheduling passes its
//! scope into the booking helper so both halves commit or roll back
//! together.

use std::sync::Arc;

use chrono::NaiveDateTime;
use metrics::counter;
use tracing::{debug, info};

use super::finish;
use crate::domain::{
    Clock, DomainError, DomainResult, Pricing, Reservation, ReservationStatus, Schedule,
    TransactionScope, UnitOfWork,
};
use crate::shared::types::{PaginatedResult, PaginationParams};

/// Service for reservation operations
pub struct ReservationService {
    uow: Arc<dyn UnitOfWork>,
    clock: Arc<dyn Clock>,
    pricing: Pricing,
}

impl ReservationService {
    pub fn new(uow: Arc<dyn UnitOfWork>, clock: Arc<dyn Clock>, pricing: Pricing) -> Self {
        Self {
            uow,
            clock,
            pricing,
        }
    }

    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    /// Book `schedule_id` for `guest_id`
    pub async fn book_reservation(
        &self,
        guest_id: i64,
        schedule_id: i64,
    ) -> DomainResult<Reservation> {
        let now = self.clock.now();
        let scope = self.uow.begin().await?;
        let result = self.book_in(&*scope, guest_id, schedule_id, now).await;
        let reservation = finish(scope, result).await?;

        counter!("reservations_booked_total").increment(1);
        info!(
            reservation_id = reservation.id,
            guest_id,
            schedule_id,
            "Reservation booked"
        );
        Ok(reservation)
    }

    pub async fn find_reservation(&self, reservation_id: i64) -> DomainResult<Reservation> {
        let scope = self.uow.begin().await?;
        let result = find_reservation(&*scope, reservation_id).await;
        finish(scope, result).await
    }

    /// Reservations created within `[start, end]`, oldest first
    pub async fn find_reservations_by_date(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Reservation>> {
        let scope = self.uow.begin().await?;
        let result = scope
            .reservations()
            .find_by_created_range(start, end, page)
            .await;
        finish(scope, result).await
    }

    /// Cancel a ready-to-play reservation and record its refund
    pub async fn cancel_reservation(&self, reservation_id: i64) -> DomainResult<Reservation> {
        let now = self.clock.now();
        let scope = self.uow.begin().await?;
        let result = self.cancel_in(&*scope, reservation_id, now).await;
        let reservation = finish(scope, result).await?;

        counter!("reservations_cancelled_total").increment(1);
        info!(
            reservation_id,
            refund = %reservation.refund_value,
            value = %reservation.value,
            "Reservation cancelled"
        );
        Ok(reservation)
    }

    /// Move a reservation to another slot.
    ///
    /// The previous reservation is settled as RESCHEDULED (with the same
    /// refund a cancel would give) and a new reservation referencing it is
    /// booked. Returns the new reservation.
    pub async fn reschedule_reservation(
        &self,
        previous_reservation_id: i64,
        schedule_id: i64,
    ) -> DomainResult<Reservation> {
        let now = self.clock.now();
        let scope = self.uow.begin().await?;
        let result = self
            .reschedule_in(&*scope, previous_reservation_id, schedule_id, now)
            .await;
        let reservation = finish(scope, result).await?;

        counter!("reservations_rescheduled_total").increment(1);
        info!(
            previous_reservation_id,
            reservation_id = reservation.id,
            schedule_id,
            "Reservation rescheduled"
        );
        Ok(reservation)
    }

    /// Schedules within `[start, end]` that no ready-to-play reservation
    /// occupies, in lookup order and without duplicates
    pub async fn find_available_schedules(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Schedule>> {
        let scope = self.uow.begin().await?;
        let result = available_in(&*scope, start, end).await;
        finish(scope, result).await
    }

    // ── Scoped steps ────────────────────────────────────────────

    async fn book_in(
        &self,
        scope: &dyn TransactionScope,
        guest_id: i64,
        schedule_id: i64,
        now: NaiveDateTime,
    ) -> DomainResult<Reservation> {
        let schedule = find_schedule(scope, schedule_id).await?;

        if !schedule.starts_after(now) {
            return Err(DomainError::validation(
                "Can book reservation only future dates.",
            ));
        }

        ensure_slot_free(scope, &schedule).await?;

        let reservation = Reservation::new(guest_id, schedule, self.pricing.charge(), now);
        scope.reservations().save(reservation).await
    }

    async fn cancel_in(
        &self,
        scope: &dyn TransactionScope,
        reservation_id: i64,
        now: NaiveDateTime,
    ) -> DomainResult<Reservation> {
        let mut reservation = find_reservation(scope, reservation_id).await?;
        self.settle(&mut reservation, ReservationStatus::Cancelled, now)?;
        scope.reservations().update(reservation).await
    }

    async fn reschedule_in(
        &self,
        scope: &dyn TransactionScope,
        previous_reservation_id: i64,
        schedule_id: i64,
        now: NaiveDateTime,
    ) -> DomainResult<Reservation> {
        let mut previous = find_reservation(scope, previous_reservation_id).await?;
        previous.ensure_modifiable(now)?;

        if schedule_id == previous.schedule.id {
            return Err(DomainError::validation(
                "Cannot reschedule to the same slot.",
            ));
        }

        let schedule = find_schedule(scope, schedule_id).await?;
        ensure_slot_free(scope, &schedule).await?;

        self.settle(&mut previous, ReservationStatus::Rescheduled, now)?;
        let previous = scope.reservations().update(previous).await?;

        let mut booked = self
            .book_in(scope, previous.guest_id, schedule_id, now)
            .await?;
        booked.previous_reservation_id = Some(previous.id);
        scope.reservations().update(booked).await
    }

    /// Validate, compute the refund and move `reservation` to `status`
    fn settle(
        &self,
        reservation: &mut Reservation,
        status: ReservationStatus,
        now: NaiveDateTime,
    ) -> DomainResult<()> {
        reservation.ensure_modifiable(now)?;
        let refund = self
            .pricing
            .refund(now, reservation.schedule.start_date_time);
        debug!(
            reservation_id = reservation.id,
            %refund,
            status = %status,
            "Settling reservation"
        );
        reservation.settle(refund, status)
    }
}

async fn find_schedule(scope: &dyn TransactionScope, schedule_id: i64) -> DomainResult<Schedule> {
    scope
        .schedules()
        .find_by_id(schedule_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Schedule", schedule_id))
}

async fn find_reservation(
    scope: &dyn TransactionScope,
    reservation_id: i64,
) -> DomainResult<Reservation> {
    scope
        .reservations()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Reservation", reservation_id))
}

/// Reject when a ready-to-play reservation already holds the slot's court and window
async fn ensure_slot_free(scope: &dyn TransactionScope, schedule: &Schedule) -> DomainResult<()> {
    let taken = scope
        .reservations()
        .find_conflicting(
            ReservationStatus::ReadyToPlay,
            schedule.court_id,
            schedule.start_date_time,
            schedule.end_date_time,
        )
        .await?;

    if !taken.is_empty() {
        counter!("reservation_conflicts_total").increment(1);
        debug!(
            schedule_id = schedule.id,
            court_id = schedule.court_id,
            "Schedule already taken"
        );
        return Err(DomainError::validation("This schedule is not available."));
    }
    Ok(())
}

async fn available_in(
    scope: &dyn TransactionScope,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> DomainResult<Vec<Schedule>> {
    let schedules = scope.schedules().find_in_range(start, end).await?;
    if schedules.is_empty() {
        return Ok(Vec::new());
    }

    let occupied: Vec<Schedule> = scope
        .reservations()
        .find_by_status_in_range(ReservationStatus::ReadyToPlay, start, end)
        .await?
        .into_iter()
        .map(|r| r.schedule)
        .collect();

    let mut available: Vec<Schedule> = Vec::with_capacity(schedules.len());
    for schedule in schedules {
        if !occupied.contains(&schedule) && !available.contains(&schedule) {
            available.push(schedule);
        }
    }
    Ok(available)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;

    use crate::domain::{calculate_refund, ManualClock, NewSchedule};
    use crate::infrastructure::InMemoryStorage;

    struct Fixture {
        service: Arc<ReservationService>,
        storage: InMemoryStorage,
        clock: Arc<ManualClock>,
    }

    /// 2030-05-10 at `h:m`
    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 5, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn fixture() -> Fixture {
        let storage = InMemoryStorage::new();
        let clock = Arc::new(ManualClock::new(at(9, 0)));
        let service = Arc::new(ReservationService::new(
            Arc::new(storage.clone()),
            clock.clone(),
            Pricing::default(),
        ));
        Fixture {
            service,
            storage,
            clock,
        }
    }

    async fn add_slot(f: &Fixture, court_id: i64, start: NaiveDateTime) -> Schedule {
        let scope = f.storage.begin().await.unwrap();
        let schedule = scope
            .schedules()
            .save(NewSchedule {
                court_id,
                start_date_time: start,
                end_date_time: start + Duration::hours(1),
            })
            .await
            .unwrap();
        scope.commit().await.unwrap();
        schedule
    }

    fn assert_validation<T: std::fmt::Debug>(result: DomainResult<T>, needle: &str) {
        match result {
            Err(DomainError::Validation(msg)) => {
                assert!(msg.contains(needle), "unexpected message: {msg}")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    // ── book ────────────────────────────────────────────────────

    #[tokio::test]
    async fn booking_future_slot_charges_full_value() {
        let f = fixture();
        let slot = add_slot(&f, 1, at(18, 0)).await;

        let r = f.service.book_reservation(11, slot.id).await.unwrap();
        assert!(r.id > 0);
        assert_eq!(r.guest_id, 11);
        assert_eq!(r.schedule, slot);
        assert_eq!(r.value, Decimal::from(20));
        assert_eq!(r.refund_value, Decimal::ZERO);
        assert_eq!(r.status, ReservationStatus::ReadyToPlay);
        assert_eq!(r.created_at, at(9, 0));

        let stored = f.service.find_reservation(r.id).await.unwrap();
        assert_eq!(stored, r);
    }

    #[tokio::test]
    async fn booking_past_or_current_slot_is_rejected() {
        let f = fixture();
        let past = add_slot(&f, 1, at(8, 0)).await;
        let now = add_slot(&f, 2, at(9, 0)).await;

        assert_validation(
            f.service.book_reservation(1, past.id).await,
            "only future dates",
        );
        assert_validation(
            f.service.book_reservation(1, now.id).await,
            "only future dates",
        );
    }

    #[tokio::test]
    async fn booking_unknown_schedule_is_not_found() {
        let f = fixture();
        let err = f.service.book_reservation(1, 999).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Schedule", .. }));
    }

    #[tokio::test]
    async fn double_booking_same_court_and_window_is_rejected() {
        let f = fixture();
        let slot = add_slot(&f, 1, at(18, 0)).await;
        let twin = add_slot(&f, 1, at(18, 0)).await;
        let other_court = add_slot(&f, 2, at(18, 0)).await;

        f.service.book_reservation(1, slot.id).await.unwrap();
        assert_validation(
            f.service.book_reservation(2, slot.id).await,
            "not available",
        );
        assert_validation(
            f.service.book_reservation(2, twin.id).await,
            "not available",
        );
        assert!(f.service.book_reservation(2, other_court.id).await.is_ok());
    }

    #[tokio::test]
    async fn cancelled_slot_can_be_booked_again() {
        let f = fixture();
        let slot = add_slot(&f, 1, at(18, 0)).await;

        let first = f.service.book_reservation(1, slot.id).await.unwrap();
        f.service.cancel_reservation(first.id).await.unwrap();
        assert!(f.service.book_reservation(2, slot.id).await.is_ok());
    }

    #[tokio::test]
    async fn concurrent_bookings_of_one_slot_admit_exactly_one() {
        let f = fixture();
        let slot = add_slot(&f, 1, at(18, 0)).await;

        let handles: Vec<_> = (0..8)
            .map(|guest| {
                let service = f.service.clone();
                tokio::spawn(async move { service.book_reservation(guest, slot.id).await })
            })
            .collect();

        let mut booked = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                booked += 1;
            }
        }
        assert_eq!(booked, 1);
    }

    // ── cancel ──────────────────────────────────────────────────

    #[tokio::test]
    async fn cancel_two_days_ahead_refunds_deposit() {
        let f = fixture();
        let slot = add_slot(&f, 1, at(9, 0) + Duration::hours(48)).await;
        let r = f.service.book_reservation(1, slot.id).await.unwrap();

        let cancelled = f.service.cancel_reservation(r.id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert_eq!(cancelled.refund_value, Decimal::TEN);
        assert_eq!(cancelled.value, Decimal::TEN);
    }

    #[tokio::test]
    async fn cancel_same_afternoon_deducts_quarter_deposit() {
        let f = fixture();
        let slot = add_slot(&f, 1, at(18, 0)).await;
        let r = f.service.book_reservation(1, slot.id).await.unwrap();

        f.clock.set(at(13, 0));
        let cancelled = f.service.cancel_reservation(r.id).await.unwrap();
        assert_eq!(cancelled.refund_value, Decimal::new(-25, 1));
        assert_eq!(cancelled.value, Decimal::new(225, 1));

        let stored = f.service.find_reservation(r.id).await.unwrap();
        assert_eq!(stored, cancelled);
    }

    #[tokio::test]
    async fn cancel_twice_is_rejected() {
        let f = fixture();
        let slot = add_slot(&f, 1, at(18, 0)).await;
        let r = f.service.book_reservation(1, slot.id).await.unwrap();

        f.service.cancel_reservation(r.id).await.unwrap();
        assert_validation(
            f.service.cancel_reservation(r.id).await,
            "not in ready to play status",
        );
    }

    #[tokio::test]
    async fn cancel_after_start_is_rejected() {
        let f = fixture();
        let slot = add_slot(&f, 1, at(10, 0)).await;
        let r = f.service.book_reservation(1, slot.id).await.unwrap();

        f.clock.set(at(10, 30));
        assert_validation(
            f.service.cancel_reservation(r.id).await,
            "only future dates",
        );
        let stored = f.service.find_reservation(r.id).await.unwrap();
        assert_eq!(stored.status, ReservationStatus::ReadyToPlay);
    }

    #[tokio::test]
    async fn cancel_unknown_reservation_is_not_found() {
        let f = fixture();
        let err = f.service.cancel_reservation(42).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Reservation", .. }));
    }

    #[tokio::test]
    async fn reschedule_unknown_reservation_is_not_found() {
        let f = fixture();
        let slot = add_slot(&f, 1, at(18, 0)).await;

        let err = f
            .service
            .reschedule_reservation(42, slot.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Reservation", .. }));
    }

    #[tokio::test]
    async fn reschedule_onto_unknown_schedule_keeps_previous_ready() {
        let f = fixture();
        let slot = add_slot(&f, 1, at(18, 0)).await;
        let r = f.service.book_reservation(3, slot.id).await.unwrap();

        let err = f
            .service
            .reschedule_reservation(r.id, slot.id + 100)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Schedule", .. }));

        let stored = f.service.find_reservation(r.id).await.unwrap();
        assert_eq!(stored, r);
        assert_eq!(stored.status, ReservationStatus::ReadyToPlay);
        assert_eq!(stored.refund_value, Decimal::ZERO);
    }

    // ── reschedule ──────────────────────────────────────────────

    #[tokio::test]
    async fn reschedule_to_same_slot_is_rejected() {
        let f = fixture();
        let slot = add_slot(&f, 1, at(18, 0)).await;
        let r = f.service.book_reservation(1, slot.id).await.unwrap();

        assert_validation(
            f.service.reschedule_reservation(r.id, slot.id).await,
            "same slot",
        );
    }

    #[tokio::test]
    async fn reschedule_links_new_reservation_and_settles_previous() {
        let f = fixture();
        let old_slot = add_slot(&f, 1, at(15, 0)).await;
        let new_slot = add_slot(&f, 1, at(20, 0)).await;
        let original = f.service.book_reservation(7, old_slot.id).await.unwrap();

        let moved = f
            .service
            .reschedule_reservation(original.id, new_slot.id)
            .await
            .unwrap();
        assert_ne!(moved.id, original.id);
        assert_eq!(moved.guest_id, 7);
        assert_eq!(moved.schedule, new_slot);
        assert_eq!(moved.status, ReservationStatus::ReadyToPlay);
        assert_eq!(moved.previous_reservation_id, Some(original.id));
        assert_eq!(moved.value, Decimal::from(20));

        let expected_refund = calculate_refund(at(9, 0), old_slot.start_date_time, Decimal::TEN);
        let previous = f.service.find_reservation(original.id).await.unwrap();
        assert_eq!(previous.status, ReservationStatus::Rescheduled);
        assert_eq!(previous.refund_value, expected_refund);
        assert_eq!(previous.value, Decimal::from(20) - expected_refund);

        let stored = f.service.find_reservation(moved.id).await.unwrap();
        assert_eq!(stored.previous_reservation_id, Some(original.id));
    }

    #[tokio::test]
    async fn reschedule_into_taken_slot_leaves_previous_untouched() {
        let f = fixture();
        let old_slot = add_slot(&f, 1, at(15, 0)).await;
        let taken = add_slot(&f, 1, at(20, 0)).await;
        let mine = f.service.book_reservation(1, old_slot.id).await.unwrap();
        f.service.book_reservation(2, taken.id).await.unwrap();

        assert_validation(
            f.service.reschedule_reservation(mine.id, taken.id).await,
            "not available",
        );
        let stored = f.service.find_reservation(mine.id).await.unwrap();
        assert_eq!(stored, mine);
    }

    #[tokio::test]
    async fn failed_booking_rolls_back_previous_settlement() {
        let f = fixture();
        let old_slot = add_slot(&f, 1, at(15, 0)).await;
        let past_slot = add_slot(&f, 1, at(7, 0)).await;
        let mine = f.service.book_reservation(1, old_slot.id).await.unwrap();

        assert_validation(
            f.service.reschedule_reservation(mine.id, past_slot.id).await,
            "only future dates",
        );
        let stored = f.service.find_reservation(mine.id).await.unwrap();
        assert_eq!(stored.status, ReservationStatus::ReadyToPlay);
        assert_eq!(stored.value, Decimal::from(20));
        assert_eq!(stored.refund_value, Decimal::ZERO);
    }

    #[tokio::test]
    async fn rescheduled_reservation_cannot_be_cancelled() {
        let f = fixture();
        let old_slot = add_slot(&f, 1, at(15, 0)).await;
        let new_slot = add_slot(&f, 2, at(15, 0)).await;
        let mine = f.service.book_reservation(1, old_slot.id).await.unwrap();
        f.service
            .reschedule_reservation(mine.id, new_slot.id)
            .await
            .unwrap();

        assert_validation(
            f.service.cancel_reservation(mine.id).await,
            "not in ready to play status",
        );
    }

    // ── queries ─────────────────────────────────────────────────

    #[tokio::test]
    async fn available_schedules_in_empty_range_is_empty() {
        let f = fixture();
        add_slot(&f, 1, at(18, 0)).await;
        let found = f
            .service
            .find_available_schedules(at(20, 0), at(23, 59))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn available_schedules_when_all_booked_is_empty() {
        let f = fixture();
        let a = add_slot(&f, 1, at(14, 0)).await;
        let b = add_slot(&f, 2, at(14, 0)).await;
        f.service.book_reservation(1, a.id).await.unwrap();
        f.service.book_reservation(2, b.id).await.unwrap();

        let found = f
            .service
            .find_available_schedules(at(0, 0), at(23, 59))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn available_schedules_keep_order_of_unbooked() {
        let f = fixture();
        let early = add_slot(&f, 1, at(10, 0)).await;
        let booked = add_slot(&f, 1, at(12, 0)).await;
        let late = add_slot(&f, 1, at(16, 0)).await;
        let freed = add_slot(&f, 2, at(11, 0)).await;

        f.service.book_reservation(1, booked.id).await.unwrap();
        let cancelled = f.service.book_reservation(2, freed.id).await.unwrap();
        f.service.cancel_reservation(cancelled.id).await.unwrap();

        let found = f
            .service
            .find_available_schedules(at(0, 0), at(23, 59))
            .await
            .unwrap();
        assert_eq!(found, vec![early, freed, late]);
    }

    #[tokio::test]
    async fn reservations_by_date_are_paged() {
        let f = fixture();
        for h in [12, 13, 14] {
            let slot = add_slot(&f, 1, at(h, 0)).await;
            f.service.book_reservation(1, slot.id).await.unwrap();
            f.clock.advance(Duration::minutes(1));
        }

        let page = f
            .service
            .find_reservations_by_date(at(0, 0), at(23, 59), PaginationParams::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].created_at, at(9, 0));
        assert_eq!(page.items[1].created_at, at(9, 1));
    }

    // ── sql store ───────────────────────────────────────────────

    #[tokio::test]
    async fn sub_cent_pricing_matches_what_sql_store_keeps() {
        use sea_orm::Database;
        use sea_orm_migration::MigratorTrait;

        use crate::infrastructure::database::migrator::Migrator;
        use crate::infrastructure::SeaOrmUnitOfWork;

        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let uow = Arc::new(SeaOrmUnitOfWork::new(db));
        let clock = Arc::new(ManualClock::new(at(9, 0)));
        let pricing = Pricing {
            reservation_value: Decimal::new(20125, 3),
            deposit: Decimal::new(125, 3),
        };
        let service = ReservationService::new(uow.clone(), clock.clone(), pricing);

        let scope = uow.begin().await.unwrap();
        let slot = scope
            .schedules()
            .save(NewSchedule {
                court_id: 1,
                start_date_time: at(18, 0),
                end_date_time: at(19, 0),
            })
            .await
            .unwrap();
        scope.commit().await.unwrap();

        let booked = service.book_reservation(1, slot.id).await.unwrap();
        assert_eq!(booked.value, Decimal::new(2012, 2));
        assert_eq!(service.find_reservation(booked.id).await.unwrap(), booked);

        clock.set(at(13, 0));
        let cancelled = service.cancel_reservation(booked.id).await.unwrap();
        assert_eq!(cancelled.refund_value, Decimal::new(-3, 2));
        assert_eq!(cancelled.value, Decimal::new(2015, 2));
        assert_eq!(
            service.find_reservation(booked.id).await.unwrap(),
            cancelled
        );
    }
}
