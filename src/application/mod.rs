//! Application layer - use cases on top of the domain

pub mod services;

// Re-export key types for convenience
pub use services::{ReservationService, ScheduleService};
