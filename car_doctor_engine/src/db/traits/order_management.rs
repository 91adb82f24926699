use crate::{
    api::OrderApiError,
    db_types::{NewOrder, Order},
};

/// The `OrderManagement` trait defines behaviour for the order ledger.
///
/// Orders are keyed by the customer's email address. There is no foreign-key relationship to any
/// user table; ownership is established purely by equality on the `email` field at query time.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Inserts a new order and returns the stored record, with its assigned id and timestamp.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderApiError>;

    /// Fetches all orders whose `email` field equals the given address, oldest first.
    async fn fetch_orders_for_email(&self, email: &str) -> Result<Vec<Order>, OrderApiError>;
}
