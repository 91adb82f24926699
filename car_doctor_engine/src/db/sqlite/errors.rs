use thiserror::Error;

use crate::api::{CatalogApiError, OrderApiError};

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database error: {0}")]
    QueryError(#[from] sqlx::Error),
}

impl From<SqliteDatabaseError> for CatalogApiError {
    fn from(e: SqliteDatabaseError) -> Self {
        CatalogApiError::DatabaseError(e.to_string())
    }
}

impl From<SqliteDatabaseError> for OrderApiError {
    fn from(e: SqliteDatabaseError) -> Self {
        OrderApiError::DatabaseError(e.to_string())
    }
}
