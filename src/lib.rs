//! # Tennis Courts Reservation Service
//!
//! Booking engine for tennis court slots: guests book a slot, cancel it
//! for a time-dependent refund, or move it to another slot.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Schedules, reservations, the refund policy, repository traits
//! - **application**: Reservation and schedule services (use cases)
//! - **infrastructure**: SeaORM persistence and an in-memory backend
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Errors, pagination, graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmUnitOfWork};

// Re-export API router
pub use interfaces::{create_api_router, ApiServices};
