//! Database entities module

pub mod reservation;
pub mod schedule;
