//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Order, Query};
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult};

use crate::domain::{DomainResult, Vehicle, VehicleRepository};
use crate::infrastructure::database::StoreSchema;

#[derive(Debug, FromQueryResult)]
struct VehicleRow {
    idcar: i64,
    name: String,
}

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
    schema: StoreSchema,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection, schema: StoreSchema) -> Self {
        Self { db, schema }
    }
}

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn list_by_name(&self) -> DomainResult<Vec<Vehicle>> {
        let s = &self.schema;
        let query = Query::select()
            .expr_as(Expr::col(Alias::new(&s.vehicle_id_column)), Alias::new("idcar"))
            .expr_as(Expr::col(Alias::new(&s.vehicle_name_column)), Alias::new("name"))
            .from(Alias::new(&s.vehicles_table))
            .order_by(Alias::new(&s.vehicle_name_column), Order::Asc)
            .to_owned();

        let stmt = self.db.get_database_backend().build(&query);
        let rows = VehicleRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|r| Vehicle {
                id: r.idcar,
                name: r.name,
            })
            .collect())
    }
}
