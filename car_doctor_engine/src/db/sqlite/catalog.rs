use sqlx::SqliteConnection;

use crate::{db::sqlite::SqliteDatabaseError, db_types::Service};

pub async fn fetch_services(conn: &mut SqliteConnection) -> Result<Vec<Service>, SqliteDatabaseError> {
    let services = sqlx::query_as::<_, Service>(
        r#"
            SELECT id, title, img, price, description
            FROM services
            ORDER BY id;
        "#,
    )
    .fetch_all(conn)
    .await?;
    Ok(services)
}

pub async fn fetch_service_by_id(
    id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Service>, SqliteDatabaseError> {
    let service = sqlx::query_as::<_, Service>(
        r#"
            SELECT id, title, img, price, description
            FROM services
            WHERE id = ?1;
        "#,
    )
    .bind(id)
    .fetch_one(conn)
    .await;
    match service {
        Err(sqlx::Error::RowNotFound) => Ok(None),
        Err(e) => Err(e.into()),
        Ok(s) => Ok(Some(s)),
    }
}
