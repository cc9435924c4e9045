//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories, all bound to one open transaction
//! through `SeaOrmTransactionScope`.

pub mod reservation_repository;
pub mod schedule_repository;
pub mod unit_of_work;

pub use unit_of_work::{SeaOrmTransactionScope, SeaOrmUnitOfWork};
