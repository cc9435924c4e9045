pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::{SeaOrmTransactionScope, SeaOrmUnitOfWork};

use sea_orm::{Database, DatabaseConnection};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./tennis.db?mode=rwc";

/// `[database]` config section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SeaORM connection URL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!(url = %config.url, "Connecting to database");
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}
