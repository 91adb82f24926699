use crate::{api::CatalogApiError, db_types::Service};

/// The `CatalogManagement` trait defines read access to the service catalog.
///
/// The catalog is seeded out-of-band by the workshop operator; over HTTP it is strictly read-only,
/// so backends only need to answer list and point lookups.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// Fetches every service in the catalog.
    async fn fetch_services(&self) -> Result<Vec<Service>, CatalogApiError>;

    /// Fetches the service with the given id. If no such service exists, `None` is returned.
    async fn fetch_service_by_id(&self, id: i64) -> Result<Option<Service>, CatalogApiError>;
}
