//! Schedule aggregate
//!
//! A schedule is a bookable time slot on one tennis court. Schedules are
//! owned by the scheduling side of the system; reservations only read them.

pub mod model;
pub mod repository;

pub use model::{NewSchedule, Schedule};
pub use repository::ScheduleRepository;
