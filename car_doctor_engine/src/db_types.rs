use cds_common::UsdCents;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

//--------------------------------------     Service       -----------------------------------------------------------
/// A catalog entry for a service the workshop offers. Records are seeded by the operator and read-only over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: i64,
    pub title: String,
    pub img: Option<String>,
    pub price: UsdCents,
    pub description: Option<String>,
}

//--------------------------------------     Order       -------------------------------------------------------------
/// A booking in the order ledger. `email` is the ownership key; the authorization gate only ever inspects that
/// field, everything else is passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub email: String,
    pub service_title: String,
    pub price: UsdCents,
    pub booking_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// An order as submitted by a client, before the store has assigned an id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub email: String,
    pub service_title: String,
    pub price: UsdCents,
    #[serde(default)]
    pub booking_date: Option<NaiveDate>,
}
