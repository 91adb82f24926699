//! Ownership check middleware for the order-listing route.
//!
//! It compares the `email` query parameter against the email of the claims the session gate
//! attached to the request. A mismatch is rejected with a 403 Forbidden response. An absent
//! parameter passes through: the downstream handler only ever filters by the authenticated email,
//! so there is no way to obtain another user's records by omitting the filter.
//!
//! This middleware must run behind [`SessionGateFactory`](super::SessionGateFactory); it treats
//! missing claims as a server misconfiguration, not as an authentication failure.

use std::{
    future::{ready, Ready},
    pin::Pin,
    rc::Rc,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    web, Error, HttpMessage,
};
use futures::Future;
use log::debug;
use serde::Deserialize;

use crate::{
    auth::JwtClaims,
    errors::{AuthError, ServerError},
};

#[derive(Debug, Deserialize)]
struct OwnerFilter {
    email: Option<String>,
}

pub struct OwnershipCheckFactory;

impl OwnershipCheckFactory {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        OwnershipCheckFactory
    }
}

impl<S, B> Transform<S, ServiceRequest> for OwnershipCheckFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = OwnershipCheckService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OwnershipCheckService { service: Rc::new(service) }))
    }
}

pub struct OwnershipCheckService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for OwnershipCheckService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let claims = req.extensions().get::<JwtClaims>().cloned().ok_or_else(|| {
                log::warn!("🔐️ No session claims found in request extensions");
                ErrorInternalServerError("No session claims found in request extensions")
            })?;
            let requested = web::Query::<OwnerFilter>::from_query(req.query_string())
                .map(|q| q.into_inner().email)
                .unwrap_or_default();
            match requested {
                Some(email) if email != claims.email => {
                    debug!("🔐️ {} requested records belonging to {email}. Denying access.", claims.email);
                    Err(ServerError::AuthenticationError(AuthError::OwnershipMismatch).into())
                },
                // A matching or absent filter falls through to the handler, which only ever
                // returns the caller's own records.
                _ => service.call(req).await,
            }
        })
    }
}
