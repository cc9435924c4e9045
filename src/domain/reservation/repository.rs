//! Reservation repository interface

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::model::{Reservation, ReservationStatus};
use crate::domain::DomainResult;
use crate::shared::types::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation and return it with its assigned ID
    async fn save(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Update an existing reservation
    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>>;

    /// Reservations in `status` on `court_id` whose schedule start and end
    /// both fall within `[start, end]`
    async fn find_conflicting(
        &self,
        status: ReservationStatus,
        court_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Reservation>>;

    /// Same window filter as `find_conflicting`, across all courts
    async fn find_by_status_in_range(
        &self,
        status: ReservationStatus,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Reservation>>;

    /// Reservations created within `[start, end]`, oldest first
    async fn find_by_created_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Reservation>>;
}
