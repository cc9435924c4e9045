//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: access to the per-aggregate repositories
//! - `TransactionScope`: a provider bound to one unit of work
//! - `UnitOfWork`: opens transaction scopes
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;

use super::reservation::ReservationRepository;
use super::schedule::ScheduleRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let slot = repos.schedules().find_by_id(7).await?;
///     let booking = repos.reservations().find_by_id(1).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn schedules(&self) -> &dyn ScheduleRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
}

// ── Unit of work ────────────────────────────────────────────────

/// Repositories bound to one open transaction.
///
/// Every read and write made through the scope is committed or discarded
/// together. Dropping a scope without committing discards its writes.
#[async_trait]
pub trait TransactionScope: RepositoryProvider {
    async fn commit(self: Box<Self>) -> DomainResult<()>;
    async fn rollback(self: Box<Self>) -> DomainResult<()>;
}

/// Opens transaction scopes.
///
/// Two scopes that touch the same reservations never interleave their
/// read-check-write sequences, so a conflict check followed by a save is
/// safe against concurrent bookings.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> DomainResult<Box<dyn TransactionScope>>;
}
