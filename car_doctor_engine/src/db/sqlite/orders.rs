use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewOrder, Order},
};

/// Inserts a new order using the given connection. This is not atomic on its own; embed the call
/// in a transaction and pass `&mut *tx` as the connection argument if you need atomicity.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, SqliteDatabaseError> {
    let inserted = sqlx::query_as::<_, Order>(
        r#"
            INSERT INTO orders (
                email,
                service_title,
                price,
                booking_date
            ) VALUES (?1, ?2, ?3, ?4)
            RETURNING id, email, service_title, price, booking_date, created_at;
        "#,
    )
    .bind(&order.email)
    .bind(&order.service_title)
    .bind(order.price)
    .bind(order.booking_date)
    .fetch_one(conn)
    .await?;
    Ok(inserted)
}

/// Returns all orders owned by `email`, oldest first. Ownership is plain equality on the email
/// column; callers must have authorized the address already.
pub async fn fetch_orders_for_email(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, SqliteDatabaseError> {
    let orders = sqlx::query_as::<_, Order>(
        r#"
            SELECT id, email, service_title, price, booking_date, created_at
            FROM orders
            WHERE email = ?1
            ORDER BY id;
        "#,
    )
    .bind(email)
    .fetch_all(conn)
    .await?;
    Ok(orders)
}
