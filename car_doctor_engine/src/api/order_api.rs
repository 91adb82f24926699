//! Unified API for the order ledger.

use std::fmt::Debug;

use crate::{
    api::OrderApiError,
    db_types::{NewOrder, Order},
    OrderManagement,
};

pub struct OrderApi<B> {
    db: B,
}

impl<B: Debug> Debug for OrderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderApi ({:?})", self.db)
    }
}

impl<B> OrderApi<B>
where B: OrderManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        self.db.insert_order(order).await
    }

    /// Fetches the orders owned by the given email address. Callers are responsible for making
    /// sure the address has been authorized; no access control happens at this layer.
    pub async fn fetch_orders_for_email(&self, email: &str) -> Result<Vec<Order>, OrderApiError> {
        self.db.fetch_orders_for_email(email).await
    }
}
