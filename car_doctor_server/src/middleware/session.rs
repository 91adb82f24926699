//! Session gate middleware for the Car Doctor Server.
//! This middleware can be placed on any route or service.
//!
//! It extracts the session token from the request's `token` cookie and validates it against the
//! server's signing secret. Valid claims are attached to the request for downstream stages and the
//! handler to read. Requests without a cookie are rejected immediately, without touching the token
//! service; requests with a bad or expired token are rejected after validation. Both cases produce
//! a 401 response and never reach the protected handler.

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
use log::{debug, trace};

use crate::{
    auth::{TokenVerifier, AUTH_COOKIE},
    errors::{AuthError, ServerError},
};

pub struct SessionGateFactory;

impl SessionGateFactory {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        SessionGateFactory
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGateFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateService { service: Rc::new(service) }))
    }
}

pub struct SessionGateService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGateService<S>
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
            trace!("🔐️ Checking session token for {} {}", req.method(), req.path());
            // Fast fail: a missing cookie never reaches the token service.
            let Some(cookie) = req.cookie(AUTH_COOKIE) else {
                debug!("🔐️ No session cookie on request. Denying access.");
                return Err(ServerError::AuthenticationError(AuthError::MissingCredential).into());
            };
            let verifier = req.app_data::<web::Data<TokenVerifier>>().ok_or_else(|| {
                log::warn!("🔐️ No token verifier registered in app data");
                ErrorInternalServerError("No token verifier registered in app data")
            })?;
            match verifier.validate_token(cookie.value()) {
                Ok(claims) => {
                    trace!("🔐️ Session token valid for {}", claims.email);
                    req.extensions_mut().insert(claims);
                    service.call(req).await
                },
                Err(e) => {
                    debug!("🔐️ Session token rejected. {e}");
                    Err(ServerError::AuthenticationError(e).into())
                },
            }
        })
    }
}
