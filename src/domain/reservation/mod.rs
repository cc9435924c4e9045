//! Reservation aggregate
//!
//! Contains the Reservation entity, its status machine, the refund
//! calculator and the repository interface.

pub mod model;
pub mod refund;
pub mod repository;

pub use model::{Reservation, ReservationStatus};
pub use refund::{calculate_refund, Pricing};
pub use repository::ReservationRepository;
