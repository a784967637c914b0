//! SeaORM implementation of TariffRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Order, Query, SelectStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult};

use crate::domain::{DailyRate, DomainResult, TariffRepository};
use crate::infrastructure::database::StoreSchema;

#[derive(Debug, FromQueryResult)]
struct DailyRateRow {
    day: i64,
    cost: f64,
}

impl From<DailyRateRow> for DailyRate {
    fn from(row: DailyRateRow) -> Self {
        Self {
            day: row.day,
            cost: row.cost,
        }
    }
}

pub struct SeaOrmTariffRepository {
    db: DatabaseConnection,
    schema: StoreSchema,
}

impl SeaOrmTariffRepository {
    pub fn new(db: DatabaseConnection, schema: StoreSchema) -> Self {
        Self { db, schema }
    }

    fn select_rates(&self, vehicle_id: i64) -> SelectStatement {
        let s = &self.schema;
        // cost may be DECIMAL on MySQL; adding a DOUBLE literal reads it as a double on every
        // backend and server version
        Query::select()
            .expr_as(Expr::col(Alias::new(&s.tariff_days_column)), Alias::new("day"))
            .expr_as(
                Expr::col(Alias::new(&s.tariff_cost_column)).add(Expr::cust("0E0")),
                Alias::new("cost"),
            )
            .from(Alias::new(&s.tariffs_table))
            .and_where(Expr::col(Alias::new(&s.tariff_vehicle_column)).eq(vehicle_id))
            .order_by(Alias::new(&s.tariff_days_column), Order::Asc)
            .to_owned()
    }
}

#[async_trait]
impl TariffRepository for SeaOrmTariffRepository {
    async fn find_by_vehicle(&self, vehicle_id: i64) -> DomainResult<Vec<DailyRate>> {
        let stmt = self
            .db
            .get_database_backend()
            .build(&self.select_rates(vehicle_id));
        let rows = DailyRateRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_cost(&self, vehicle_id: i64, day_count: i64, cost: f64) -> DomainResult<u64> {
        let s = &self.schema;
        let update = Query::update()
            .table(Alias::new(&s.tariffs_table))
            .value(Alias::new(&s.tariff_cost_column), cost)
            .and_where(Expr::col(Alias::new(&s.tariff_vehicle_column)).eq(vehicle_id))
            .and_where(Expr::col(Alias::new(&s.tariff_days_column)).eq(day_count))
            .to_owned();

        let stmt = self.db.get_database_backend().build(&update);
        let result = self.db.execute(stmt).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbBackend;

    use crate::domain::DomainError;
    use crate::infrastructure::database::repositories::test_support::{fleet_db, seed};

    async fn repo_with_rows() -> SeaOrmTariffRepository {
        let db = fleet_db().await;
        seed(
            &db,
            "INSERT INTO wp_vikrentcar_dispcost (idcar, days, cost) VALUES
                (7, 7, 80.0), (7, 1, 15.0), (7, 3, 40.0), (8, 1, 22.5);",
        )
        .await;
        SeaOrmTariffRepository::new(db, StoreSchema::default())
    }

    #[tokio::test]
    async fn finds_rows_of_one_vehicle_ordered_by_day() {
        let repo = repo_with_rows().await;
        let rates = repo.find_by_vehicle(7).await.unwrap();
        assert_eq!(
            rates,
            vec![
                DailyRate { day: 1, cost: 15.0 },
                DailyRate { day: 3, cost: 40.0 },
                DailyRate { day: 7, cost: 80.0 },
            ]
        );
    }

    #[tokio::test]
    async fn mysql_rate_query_reads_cost_as_double() {
        let repo = repo_with_rows().await;
        let stmt = DbBackend::MySql.build(&repo.select_rates(7));
        assert_eq!(
            stmt.sql,
            "SELECT `days` AS `day`, `cost` + 0E0 AS `cost` FROM `wp_vikrentcar_dispcost` \
             WHERE `idcar` = ? ORDER BY `days` ASC"
        );
    }

    #[tokio::test]
    async fn decimal_costs_read_as_doubles() {
        let db = fleet_db().await;
        seed(
            &db,
            "CREATE TABLE legacy_dispcost (idcar INTEGER, days INTEGER, cost DECIMAL(12, 2));
             INSERT INTO legacy_dispcost VALUES (5, 2, 30), (5, 1, 12.5);",
        )
        .await;
        let schema = StoreSchema {
            tariffs_table: "legacy_dispcost".into(),
            ..StoreSchema::default()
        };
        let repo = SeaOrmTariffRepository::new(db, schema);

        assert_eq!(
            repo.find_by_vehicle(5).await.unwrap(),
            vec![
                DailyRate { day: 1, cost: 12.5 },
                DailyRate { day: 2, cost: 30.0 },
            ]
        );
    }

    #[tokio::test]
    async fn vehicle_without_rows_yields_empty() {
        let repo = repo_with_rows().await;
        assert!(repo.find_by_vehicle(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_touches_only_the_matching_row() {
        let repo = repo_with_rows().await;

        assert_eq!(repo.update_cost(7, 3, 45.0).await.unwrap(), 1);

        let rates = repo.find_by_vehicle(7).await.unwrap();
        assert_eq!(rates[1], DailyRate { day: 3, cost: 45.0 });
        assert_eq!(rates[0].cost, 15.0);
        assert_eq!(repo.find_by_vehicle(8).await.unwrap()[0].cost, 22.5);
    }

    #[tokio::test]
    async fn update_without_matching_row_affects_nothing() {
        let repo = repo_with_rows().await;

        assert_eq!(repo.update_cost(7, 30, 500.0).await.unwrap(), 0);
        assert_eq!(repo.find_by_vehicle(7).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn same_value_update_still_counts_the_row() {
        let repo = repo_with_rows().await;
        assert_eq!(repo.update_cost(7, 7, 80.0).await.unwrap(), 1);
        assert_eq!(repo.update_cost(7, 7, 80.0).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_table_is_a_store_error() {
        let db = fleet_db().await;
        let repo = SeaOrmTariffRepository::new(db, StoreSchema::with_prefix("nope_"));

        let err = repo.find_by_vehicle(7).await.unwrap_err();
        match err {
            DomainError::Store(message) => assert!(message.contains("nope_vikrentcar_dispcost")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
