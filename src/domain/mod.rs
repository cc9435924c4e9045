pub mod clock;
pub mod repositories;
pub mod reservation;
pub mod schedule;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use repositories::{DomainResult, RepositoryProvider, TransactionScope, UnitOfWork};
pub use reservation::{
    calculate_refund, Pricing, Reservation, ReservationRepository, ReservationStatus,
};
pub use schedule::{NewSchedule, Schedule, ScheduleRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
