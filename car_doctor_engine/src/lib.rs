//! Car Doctor storage engine
//!
//! This library holds the persistence layer for the car doctor server. It is split into two parts:
//! 1. Database management and control ([`mod@db`]). Sqlite is the only supported backend right now. You should never
//!    need to access the database directly; use the public API objects instead. The exception is the data types used
//!    in the database, which are defined in the `db_types` module and are public.
//! 2. The public API objects ([`CatalogApi`] and [`OrderApi`]). These are thin, backend-generic wrappers around the
//!    [`CatalogManagement`] and [`OrderManagement`] traits. Specific backends implement those traits in order to act
//!    as a store for the server.
mod api;
mod db;

pub mod db_types;

pub use api::{CatalogApi, CatalogApiError, OrderApi, OrderApiError};
#[cfg(feature = "sqlite")]
pub use db::sqlite::{SqliteDatabase, SqliteDatabaseError};
pub use db::traits::{CatalogManagement, OrderManagement};
