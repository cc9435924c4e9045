//! Database migrations module

pub use sea_orm_migration::prelude::*;

use sea_orm::DbBackend;

mod m20240101_000001_create_schedules;
mod m20240101_000002_create_reservations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_schedules::Migration),
            Box::new(m20240101_000002_create_reservations::Migration),
        ]
    }
}

/// Auto-increment primary key wide enough for the `i64` entity ids.
///
/// SQLite only auto-increments an `INTEGER PRIMARY KEY`, which is already
/// 64-bit there; other backends get a `BIGINT` key.
pub(crate) fn id_column<T: IntoIden>(backend: DbBackend, name: T) -> ColumnDef {
    let mut column = ColumnDef::new(name);
    match backend {
        DbBackend::Sqlite => column.integer(),
        _ => column.big_integer(),
    };
    column.not_null().auto_increment().primary_key().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Iden)]
    enum Sample {
        Table,
        Id,
    }

    fn create_sql(backend: DbBackend) -> String {
        let stmt = Table::create()
            .table(Sample::Table)
            .col(&mut id_column(backend, Sample::Id))
            .to_owned();
        backend.build(&stmt).sql.to_lowercase()
    }

    #[test]
    fn id_column_is_64_bit_per_backend() {
        let sqlite = create_sql(DbBackend::Sqlite);
        assert!(sqlite.contains("integer") && sqlite.contains("autoincrement"));
        assert!(!sqlite.contains("bigint"));
        assert!(create_sql(DbBackend::Postgres).contains("bigserial"));
        assert!(create_sql(DbBackend::MySql).contains("bigint"));
    }
}

