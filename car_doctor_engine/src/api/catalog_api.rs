//! Unified API for reading the service catalog.

use std::fmt::Debug;

use crate::{api::CatalogApiError, db_types::Service, CatalogManagement};

pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn fetch_services(&self) -> Result<Vec<Service>, CatalogApiError> {
        self.db.fetch_services().await
    }

    /// Fetches a single catalog entry. If no service with the given id exists, `None` is returned.
    pub async fn fetch_service_by_id(&self, id: i64) -> Result<Option<Service>, CatalogApiError> {
        self.db.fetch_service_by_id(id).await
    }
}
