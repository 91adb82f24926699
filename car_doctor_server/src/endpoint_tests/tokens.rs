//! Unit tests for the token service: issuance, verification, and the expiry window.

use chrono::{Duration, Utc};
use jwt_compact::{alg::Hs256, AlgorithmExt, Token, UntrustedToken};

use super::helpers::{claims_for, get_auth_config, issue_token};
use crate::{
    auth::{JwtClaims, TokenIssuer, TokenVerifier},
    config::AuthConfig,
    errors::AuthError,
};

#[test]
fn issued_tokens_round_trip() {
    let config = get_auth_config();
    let issuer = TokenIssuer::new(&config);
    let verifier = TokenVerifier::new(&config);
    let mut claims = claims_for("a@x.com");
    claims.extra.insert("name".into(), "Bob the Mechanic".into());
    let token = issuer.issue_token(claims.clone(), None).unwrap();
    let decoded = verifier.validate_token(&token).unwrap();
    assert_eq!(decoded, claims);
}

#[test]
fn tokens_expire_one_hour_after_issuance() {
    let config = get_auth_config();
    let issuer = TokenIssuer::new(&config);
    let token = issuer.issue_token(claims_for("a@x.com"), None).unwrap();
    let untrusted = UntrustedToken::new(&token).unwrap();
    let token: Token<JwtClaims> = Hs256.validator(&config.hs256_key()).validate(&untrusted).unwrap();
    let (header, claims) = token.into_parts();
    let expiry = claims.expiration.unwrap().signed_duration_since(Utc::now());
    assert!(expiry.num_minutes() >= 59 && expiry.num_minutes() < 61, "Expiry: {} min", expiry.num_minutes());
    assert_eq!(header.token_type.as_deref(), Some("JWT"));
}

#[test]
fn tokens_signed_with_another_secret_are_rejected() {
    // `AuthConfig::default` generates a random secret, so the two configs never match.
    let issuer = TokenIssuer::new(&AuthConfig::default());
    let verifier = TokenVerifier::new(&get_auth_config());
    let token = issuer.issue_token(claims_for("a@x.com"), None).unwrap();
    let err = verifier.validate_token(&token).unwrap_err();
    assert!(matches!(err, AuthError::ValidationError(_)), "was: {err:?}");
}

#[test]
fn expired_tokens_are_rejected() {
    let verifier = TokenVerifier::new(&get_auth_config());
    let token = issue_token(claims_for("a@x.com"), Utc::now() - Duration::seconds(1));
    let err = verifier.validate_token(&token).unwrap_err();
    assert!(matches!(err, AuthError::Expired), "was: {err:?}");
}

#[test]
fn tokens_inside_the_validity_window_are_accepted() {
    let verifier = TokenVerifier::new(&get_auth_config());
    let token = issue_token(claims_for("a@x.com"), Utc::now() + Duration::minutes(59));
    assert!(verifier.validate_token(&token).is_ok());
}

#[test]
fn garbage_tokens_are_rejected() {
    let verifier = TokenVerifier::new(&get_auth_config());
    let err = verifier.validate_token("made up nonsense").unwrap_err();
    assert!(matches!(err, AuthError::PoorlyFormattedToken(_)), "was: {err:?}");
}
