//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod repository_provider;
pub mod tariff_repository;
pub mod vehicle_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
pub use tariff_repository::SeaOrmTariffRepository;
pub use vehicle_repository::SeaOrmVehicleRepository;

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

    /// In-memory SQLite with the default VikRentCar tables.
    ///
    /// One pooled connection: every SQLite memory connection is its own database.
    pub async fn fleet_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        db.execute_unprepared(
            "CREATE TABLE wp_vikrentcar_cars (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                avail INTEGER NOT NULL DEFAULT 1
            );
            CREATE TABLE wp_vikrentcar_dispcost (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                idcar INTEGER NOT NULL,
                days INTEGER NOT NULL,
                idprice INTEGER NOT NULL DEFAULT 1,
                cost REAL NOT NULL,
                UNIQUE (idcar, days)
            );",
        )
        .await
        .unwrap();
        db
    }

    pub async fn seed(db: &DatabaseConnection, sql: &str) {
        db.execute_unprepared(sql).await.unwrap();
    }
}
