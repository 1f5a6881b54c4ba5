//! Session token and password handling tests
//!
//! Validates token issuance claims and the password hashing contract
//! without touching a database.

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

use huddle_auth::{
    hash_password, issue_session_token, validate_password_strength, verify_password, AuthConfig,
    AuthIdentity,
};

#[derive(Debug, Deserialize)]
struct DecodedClaims {
    sub: String,
    email: String,
    name: String,
    iat: u64,
    exp: u64,
}

fn test_identity() -> AuthIdentity {
    let now = Utc::now();
    AuthIdentity {
        id: Uuid::new_v4(),
        email: "alice@example.com".to_string(),
        name: "Alice".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_issued_token_carries_identity_claims() {
    let config = AuthConfig::new("test-secret".to_string(), 3600);
    let identity = test_identity();

    let token = issue_session_token(&identity, &config).unwrap();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    let decoded = decode::<DecodedClaims>(
        &token,
        &DecodingKey::from_secret(b"test-secret"),
        &validation,
    )
    .unwrap();

    assert_eq!(decoded.claims.sub, identity.id.to_string());
    assert_eq!(decoded.claims.email, "alice@example.com");
    assert_eq!(decoded.claims.name, "Alice");
    assert_eq!(decoded.claims.exp - decoded.claims.iat, 3600);
}

#[test]
fn test_token_rejected_with_wrong_secret() {
    let config = AuthConfig::new("test-secret".to_string(), 3600);
    let token = issue_session_token(&test_identity(), &config).unwrap();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    let result = decode::<DecodedClaims>(
        &token,
        &DecodingKey::from_secret(b"different-secret"),
        &validation,
    );

    assert!(result.is_err());
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as u64;
    let claims = serde_json::json!({
        "sub": Uuid::new_v4().to_string(),
        "email": "alice@example.com",
        "name": "Alice",
        "iat": now - 7200,
        "exp": now - 3600,
    });

    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    let result = decode::<DecodedClaims>(
        &token,
        &DecodingKey::from_secret(b"test-secret"),
        &validation,
    );

    assert!(result.is_err());
}

#[test]
fn test_password_hash_and_verify_roundtrip() {
    let hash = hash_password("correct horse battery").unwrap();

    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("correct horse battery", &hash).unwrap());
    assert!(!verify_password("wrong password", &hash).unwrap());
}

#[test]
fn test_password_hashes_are_salted() {
    let a = hash_password("same password").unwrap();
    let b = hash_password("same password").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_password_strength_rules() {
    assert!(validate_password_strength("password1").is_ok());

    // Too short
    assert!(validate_password_strength("pass1").is_err());
    // No digit
    assert!(validate_password_strength("passwords").is_err());
    // No letter
    assert!(validate_password_strength("12345678").is_err());
}
