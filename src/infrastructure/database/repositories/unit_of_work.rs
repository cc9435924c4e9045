//! SeaORM implementation of UnitOfWork

use async_trait::async_trait;
use log::debug;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::domain::{
    DomainResult, RepositoryProvider, ReservationRepository, ScheduleRepository,
    TransactionScope, UnitOfWork,
};

/// Opens database transactions on a shared connection pool.
///
/// ```ignore
/// let uow = SeaOrmUnitOfWork::new(db.clone());
/// let scope = uow.begin().await?;
/// let slot = scope.schedules().find_by_id(7).await?;
/// scope.commit().await?;
/// ```
#[derive(Clone)]
pub struct SeaOrmUnitOfWork {
    db: DatabaseConnection,
}

impl SeaOrmUnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    async fn begin(&self) -> DomainResult<Box<dyn TransactionScope>> {
        let txn = self.db.begin().await?;
        debug!("Transaction started");
        Ok(Box::new(SeaOrmTransactionScope { txn }))
    }
}

/// Repositories running inside one `DatabaseTransaction`.
///
/// Dropping the scope without committing rolls the transaction back.
pub struct SeaOrmTransactionScope {
    pub(super) txn: DatabaseTransaction,
}

impl RepositoryProvider for SeaOrmTransactionScope {
    fn schedules(&self) -> &dyn ScheduleRepository {
        self
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }
}

#[async_trait]
impl TransactionScope for SeaOrmTransactionScope {
    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.txn.commit().await?;
        debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        self.txn.rollback().await?;
        debug!("Transaction rolled back");
        Ok(())
    }
}
