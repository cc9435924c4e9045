//! In-memory storage implementation

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{
    DomainError, DomainResult, NewSchedule, RepositoryProvider, Reservation,
    ReservationRepository, ReservationStatus, Schedule, ScheduleRepository, TransactionScope,
    UnitOfWork,
};
use crate::shared::types::{PaginatedResult, PaginationParams};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    schedules: BTreeMap<i64, Schedule>,
    reservations: BTreeMap<i64, Reservation>,
    schedule_counter: i64,
    reservation_counter: i64,
}

/// In-memory storage for development and testing.
///
/// Scopes are serialised: `begin` holds the state lock until the scope is
/// committed or dropped. Writes go to a working copy that replaces the
/// shared state only on commit.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStorage {
    async fn begin(&self) -> DomainResult<Box<dyn TransactionScope>> {
        let committed = self.state.clone().lock_owned().await;
        let working = Mutex::new(committed.clone());
        Ok(Box::new(InMemoryScope { committed, working }))
    }
}

/// Open in-memory transaction
pub struct InMemoryScope {
    committed: OwnedMutexGuard<MemoryState>,
    working: Mutex<MemoryState>,
}

impl RepositoryProvider for InMemoryScope {
    fn schedules(&self) -> &dyn ScheduleRepository {
        self
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }
}

#[async_trait]
impl TransactionScope for InMemoryScope {
    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let InMemoryScope {
            mut committed,
            working,
        } = *self;
        *committed = working.into_inner();
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScope {
    async fn save(&self, schedule: NewSchedule) -> DomainResult<Schedule> {
        let mut state = self.working.lock().await;
        state.schedule_counter += 1;
        let saved = Schedule {
            id: state.schedule_counter,
            court_id: schedule.court_id,
            start_date_time: schedule.start_date_time,
            end_date_time: schedule.end_date_time,
        };
        state.schedules.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Schedule>> {
        Ok(self.working.lock().await.schedules.get(&id).cloned())
    }

    async fn find_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Schedule>> {
        let state = self.working.lock().await;
        let mut found: Vec<Schedule> = state
            .schedules
            .values()
            .filter(|s| s.lies_within(start, end))
            .cloned()
            .collect();
        found.sort_by_key(|s| (s.start_date_time, s.id));
        Ok(found)
    }
}

#[async_trait]
impl ReservationRepository for InMemoryScope {
    async fn save(&self, mut reservation: Reservation) -> DomainResult<Reservation> {
        let mut state = self.working.lock().await;
        state.reservation_counter += 1;
        reservation.id = state.reservation_counter;
        state.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation> {
        let mut state = self.working.lock().await;
        if !state.reservations.contains_key(&reservation.id) {
            return Err(DomainError::not_found("Reservation", reservation.id));
        }
        state.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        Ok(self.working.lock().await.reservations.get(&id).cloned())
    }

    async fn find_conflicting(
        &self,
        status: ReservationStatus,
        court_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Reservation>> {
        let state = self.working.lock().await;
        Ok(state
            .reservations
            .values()
            .filter(|r| {
                r.status == status
                    && r.schedule.court_id == court_id
                    && r.schedule.lies_within(start, end)
            })
            .cloned()
            .collect())
    }

    async fn find_by_status_in_range(
        &self,
        status: ReservationStatus,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Reservation>> {
        let state = self.working.lock().await;
        Ok(state
            .reservations
            .values()
            .filter(|r| r.status == status && r.schedule.lies_within(start, end))
            .cloned()
            .collect())
    }

    async fn find_by_created_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Reservation>> {
        let state = self.working.lock().await;
        let mut matching: Vec<&Reservation> = state
            .reservations
            .values()
            .filter(|r| r.created_at >= start && r.created_at <= end)
            .collect();
        matching.sort_by_key(|r| (r.created_at, r.id));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }
}
