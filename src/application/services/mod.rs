//! Application services

mod reservation;
mod schedule;

pub use reservation::ReservationService;
pub use schedule::ScheduleService;

use tracing::warn;

use crate::domain::{DomainResult, TransactionScope};

/// Commit the scope when `result` is Ok, roll it back otherwise.
///
/// A failed rollback is logged; the caller still sees the original error.
async fn finish<T>(scope: Box<dyn TransactionScope>, result: DomainResult<T>) -> DomainResult<T> {
    match result {
        Ok(value) => {
            scope.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = scope.rollback().await {
                warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(e)
        }
    }
}
