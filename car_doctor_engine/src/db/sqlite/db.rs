use std::{fmt::Debug, str::FromStr};

use log::*;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use super::{catalog, orders, SqliteDatabaseError};
use crate::{
    api::{CatalogApiError, OrderApiError},
    db::traits::{CatalogManagement, OrderManagement},
    db_types::{NewOrder, Order, Service},
};

const CREATE_SERVICES: &str = r#"
    CREATE TABLE IF NOT EXISTS services (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        img TEXT,
        price INTEGER NOT NULL,
        description TEXT
    );
"#;

const CREATE_ORDERS: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL,
        service_title TEXT NOT NULL,
        price INTEGER NOT NULL,
        booking_date DATE,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
"#;

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Connect to the database at `url`, creating the database file and the schema if they do not
    /// exist yet.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
        let db = Self { url: url.to_string(), pool };
        db.create_schema().await?;
        debug!("🗃️ Connected to database at {url}");
        Ok(db)
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create_schema(&self) -> Result<(), SqliteDatabaseError> {
        sqlx::query(CREATE_SERVICES).execute(&self.pool).await?;
        sqlx::query(CREATE_ORDERS).execute(&self.pool).await?;
        Ok(())
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_services(&self) -> Result<Vec<Service>, CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let services = catalog::fetch_services(&mut conn).await?;
        Ok(services)
    }

    async fn fetch_service_by_id(&self, id: i64) -> Result<Option<Service>, CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let service = catalog::fetch_service_by_id(id, &mut conn).await?;
        Ok(service)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let order = orders::insert_order(order, &mut conn).await?;
        debug!("🗃️ Order for {} has been saved in the DB with id {}", order.email, order.id);
        Ok(order)
    }

    async fn fetch_orders_for_email(&self, email: &str) -> Result<Vec<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let orders = orders::fetch_orders_for_email(email, &mut conn).await?;
        trace!("🗃️ {} orders on record for {email}", orders.len());
        Ok(orders)
    }
}
