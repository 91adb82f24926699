use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use chrono::{DateTime, Duration, Utc};
use jwt_compact::{
    alg::{Hs256, Hs256Key},
    AlgorithmExt, Claims, Header, TimeOptions, Token, UntrustedToken, ValidationError,
};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

/// Name of the cookie carrying the session token.
pub const AUTH_COOKIE: &str = "token";

/// The identity carried by a session token. The login payload is signed as-is: `email` is the only
/// field the server ever interprets, everything else round-trips through the token untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Zero leeway: a token one second past its expiry is already invalid.
fn time_options() -> TimeOptions {
    TimeOptions::new(Duration::zero(), Utc::now as fn() -> DateTime<Utc>)
}

pub struct TokenIssuer {
    key: Hs256Key,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self { key: config.hs256_key() }
    }

    /// Sign a session token for the given claims.
    /// This method DOES NOT validate the shape of the claims beyond requiring an email; whatever
    /// the login request supplied becomes the signed payload. Tokens are valid for exactly one
    /// hour unless `duration` overrides that.
    pub fn issue_token(&self, claims: JwtClaims, duration: Option<Duration>) -> Result<String, ServerError> {
        let header = Header::empty().with_token_type("JWT");
        let duration = duration.unwrap_or_else(|| Duration::hours(1));
        let claims = Claims::new(claims).set_duration_and_issuance(&time_options(), duration);
        Hs256
            .token(&header, &claims, &self.key)
            .map_err(|e| ServerError::CouldNotSerializeAccessToken(format!("{e}")))
    }
}

#[derive(Clone)]
pub struct TokenVerifier {
    key: Hs256Key,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        Self { key: config.hs256_key() }
    }

    /// Check signature integrity and expiry against the current time, returning the decoded
    /// claims on success.
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let untrusted = UntrustedToken::new(token).map_err(|e| AuthError::PoorlyFormattedToken(format!("{e}")))?;
        let token: Token<JwtClaims> = Hs256.validator(&self.key).validate(&untrusted)?;
        token.claims().validate_expiration(&time_options())?;
        Ok(token.claims().custom.clone())
    }
}

impl From<ValidationError> for AuthError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::Expired => AuthError::Expired,
            other => AuthError::ValidationError(other.to_string()),
        }
    }
}

/// Pulls the claims the session gate attached to the request. Handlers taking `JwtClaims` as an
/// argument therefore only ever run behind the gate.
impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<JwtClaims>().cloned().ok_or_else(|| {
            warn!("🔐️ No session claims in request extensions. Is the session gate mounted on this route?");
            ServerError::AuthenticationError(AuthError::MissingCredential)
        });
        ready(claims)
    }
}
