//! Reservation module: booking, cancellation, rescheduling and slot availability

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
