use actix_web::{
    body::MessageBody,
    cookie::Cookie,
    http::StatusCode,
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
    HttpResponse,
};
use cds_common::Secret;
use chrono::{DateTime, Utc};
use jwt_compact::{alg::Hs256, AlgorithmExt, Claims, Header};
use log::debug;

use crate::{
    auth::{JwtClaims, TokenVerifier, AUTH_COOKIE},
    config::AuthConfig,
};

// Creates a test `AuthConfig` with a fixed secret. DO NOT re-use this secret anywhere.
pub fn get_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: Secret::new("test-secret-0123456789abcdef0123456789abcdef".to_string()) }
}

pub fn claims_for(email: &str) -> JwtClaims {
    JwtClaims { email: email.to_string(), extra: serde_json::Map::new() }
}

/// Sign a token with the test secret and an explicit expiry.
pub fn issue_token(claims: JwtClaims, expiry: DateTime<Utc>) -> String {
    let config = get_auth_config();
    let header = Header::empty().with_token_type("JWT");
    let mut claims = Claims::new(claims);
    claims.expiration = Some(expiry);
    Hs256.token(&header, &claims, &config.hs256_key()).expect("Failed to sign token")
}

/// Issue a GET request against an app configured by `configure`, optionally carrying a session
/// cookie. Middleware and handler rejections surface as service errors in the test harness; the
/// real HttpServer renders them with the same ResponseError impl, so they are converted here.
pub async fn get_request(
    token: &str,
    path: &str,
    configure: fn(&mut ServiceConfig),
) -> (StatusCode, String) {
    let mut req = TestRequest::get().uri(path);
    if !token.is_empty() {
        req = req.cookie(Cookie::new(AUTH_COOKIE, token.to_owned()));
    }
    let req = req.to_request();
    let config = get_auth_config();
    let app = App::new().app_data(web::Data::new(TokenVerifier::new(&config))).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = match test::try_call_service(&service, req).await {
        Ok(res) => res.into_parts().1,
        Err(e) => HttpResponse::from_error(e),
    };
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}
