//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Note that since each worker thread processes its requests sequentially, handlers must never block the current
//! thread. Database work belongs in `.await`ed calls so that worker threads keep serving other requests.

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    get, post, web, HttpResponse, Responder,
};
use car_doctor_engine::{
    db_types::NewOrder, CatalogApi, CatalogManagement, OrderApi, OrderManagement,
};
use log::*;

use crate::{
    auth::{JwtClaims, TokenIssuer, AUTH_COOKIE},
    config::ServerOptions,
    data_objects::JsonResponse,
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    // Gated routes sit behind the full session gate: the token verifier runs first, then the
    // ownership check, then the handler.
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where gated)  => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds)++ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::OwnershipCheckFactory::new())
                    .wrap($crate::middleware::SessionGateFactory::new());
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Welcome to the car doctor server.")
}

//----------------------------------------------   Auth  ----------------------------------------------------
/// Route handler for the login endpoint
///
/// Whatever JSON body the client posts becomes the signed claims, as long as it carries an
/// `email` field; no further validation of the payload shape is performed. The issued token is
/// valid for exactly one hour and travels back as an httpOnly cookie, so browser scripts never
/// see it and the transport re-attaches it to every subsequent request automatically.
#[post("/jwt")]
pub async fn login(
    body: web::Json<JwtClaims>,
    signer: web::Data<TokenIssuer>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let claims = body.into_inner();
    trace!("💻️ Received login request for {}", claims.email);
    let token = signer.issue_token(claims, None)?;
    let cookie = session_cookie(token, &options);
    Ok(HttpResponse::Ok().cookie(cookie).json(JsonResponse::success()))
}

/// Logout clears the cookie client-side; the server holds no session state to destroy, and an
/// unexpired token that the client kept a copy of would still verify.
#[post("/logout")]
pub async fn logout(options: web::Data<ServerOptions>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received logout request");
    let mut cookie = session_cookie(String::new(), &options);
    cookie.set_max_age(CookieDuration::ZERO);
    Ok(HttpResponse::Ok().cookie(cookie).json(JsonResponse::success()))
}

/// Cross-site cookie delivery over HTTPS requires the `Secure` + `SameSite=None` pairing, so the
/// flags have to follow the deployment environment. Local development gets the strict profile.
fn session_cookie(token: String, options: &ServerOptions) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(options.production)
        .same_site(if options.production { SameSite::None } else { SameSite::Strict })
        .finish()
}

//----------------------------------------------   Catalog  ----------------------------------------------------
route!(services => Get "/services" impl CatalogManagement);
pub async fn services<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET all services");
    let services = api.fetch_services().await.map_err(|e| {
        debug!("💻️ Could not fetch the service catalog. {e}");
        ServerError::BackendError(e.to_string())
    })?;
    Ok(HttpResponse::Ok().json(services))
}

route!(service_by_id => Get "/services/{id}" impl CatalogManagement);
pub async fn service_by_id<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET service {id}");
    let service = api
        .fetch_service_by_id(id)
        .await
        .map_err(|e| ServerError::BackendError(e.to_string()))?
        .ok_or_else(|| ServerError::NoRecordFound(format!("No service with id {id}")))?;
    Ok(HttpResponse::Ok().json(service))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(new_order => Post "/orders" impl OrderManagement);
pub async fn new_order<B: OrderManagement>(
    body: web::Json<NewOrder>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order = body.into_inner();
    debug!("💻️ New order for {}", order.email);
    let order = api.insert_order(order).await.map_err(|e| {
        debug!("💻️ Could not insert order. {e}");
        ServerError::BackendError(e.to_string())
    })?;
    Ok(HttpResponse::Ok().json(order))
}

route!(my_orders => Get "/orders" impl OrderManagement where gated);
/// Orders for the authenticated caller. The session gate has verified the token and the ownership
/// check has vetted any `email` query filter, so the authenticated email is the only filter that
/// is ever applied here.
pub async fn my_orders<B: OrderManagement>(
    claims: JwtClaims,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders for {}", claims.email);
    let orders = api.fetch_orders_for_email(&claims.email).await.map_err(|e| {
        debug!("💻️ Could not fetch orders for {}. {e}", claims.email);
        ServerError::BackendError(e.to_string())
    })?;
    Ok(HttpResponse::Ok().json(orders))
}
