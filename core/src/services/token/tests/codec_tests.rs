//! Unit tests for the token codec

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use super::{test_config, ACCESS_SECRET};
use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenCodec, TokenServiceConfig};

fn codec() -> TokenCodec {
    TokenCodec::new(&test_config()).expect("valid test config")
}

fn token_error(result: Result<Claims, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(err)) => err,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[test]
fn test_access_token_round_trip() {
    let codec = codec();
    let token = codec.issue_access_token("user-123", "trainer", "trainer@fitline.app").unwrap();

    let claims = codec.verify_access_token(&token).unwrap();
    assert_eq!(claims.user_id, "user-123");
    assert_eq!(claims.user_type, "trainer");
    assert_eq!(claims.email, "trainer@fitline.app");
    assert_eq!(claims.sub, "user-123");

    let expected_exp = (Utc::now() + Duration::minutes(15)).timestamp();
    assert!((claims.exp - expected_exp).abs() <= 2);
}

#[test]
fn test_refresh_token_round_trip() {
    let codec = codec();
    let token = codec.issue_refresh_token("user-456", "client", "client@fitline.app").unwrap();

    let claims = codec.verify_refresh_token(&token).unwrap();
    assert_eq!(claims.user_id, "user-456");
    assert_eq!(claims.user_type, "client");
    assert_eq!(claims.email, "client@fitline.app");

    let expected_exp = (Utc::now() + Duration::days(7)).timestamp();
    assert!((claims.exp - expected_exp).abs() <= 2);
}

#[test]
fn test_wire_format_is_three_url_safe_parts() {
    let token = codec().issue_access_token("u1", "trainer", "a@x.com").unwrap();
    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);
    for part in parts {
        assert!(!part.is_empty());
        assert!(part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}

#[test]
fn test_empty_identity_fields_are_rejected() {
    let codec = codec();
    let cases = [
        ("", "trainer", "a@x.com", "user_id"),
        ("u1", "", "a@x.com", "user_type"),
        ("u1", "trainer", "", "email"),
    ];
    for (user_id, user_type, email, field) in cases {
        for result in [
            codec.issue_access_token(user_id, user_type, email),
            codec.issue_refresh_token(user_id, user_type, email),
        ] {
            match result {
                Err(DomainError::Token(TokenError::MissingIdentity { field: f })) => {
                    assert_eq!(f, field)
                }
                other => panic!("expected MissingIdentity for {}, got {:?}", field, other),
            }
        }
    }
}

#[test]
fn test_token_kinds_do_not_cross_verify() {
    let codec = codec();
    let access = codec.issue_access_token("user-123", "trainer", "a@x.com").unwrap();
    let refresh = codec.issue_refresh_token("user-123", "trainer", "a@x.com").unwrap();

    assert_eq!(
        token_error(codec.verify_refresh_token(&access)),
        TokenError::InvalidSignature
    );
    assert_eq!(
        token_error(codec.verify_access_token(&refresh)),
        TokenError::InvalidSignature
    );
}

#[test]
fn test_tampered_tokens_fail() {
    let codec = codec();
    let token = codec.issue_access_token("user-123", "client", "c@x.com").unwrap();
    let bytes = token.as_bytes();

    for i in 0..bytes.len() {
        if bytes[i] == b'.' {
            continue;
        }
        let mut tampered = bytes.to_vec();
        tampered[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(
            codec.verify_access_token(&tampered).is_err(),
            "tampering position {} was accepted",
            i
        );
    }
}

#[test]
fn test_expired_token_fails_with_valid_signature() {
    let now = Utc::now();
    let claims = Claims {
        user_id: "user-123".to_string(),
        user_type: "trainer".to_string(),
        email: "trainer@fitline.app".to_string(),
        jti: "expired".to_string(),
        iat: (now - Duration::hours(2)).timestamp(),
        exp: (now - Duration::hours(1)).timestamp(),
        sub: "user-123".to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(ACCESS_SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(
        token_error(codec().verify_access_token(&token)),
        TokenError::TokenExpired
    );
}

#[test]
fn test_expiry_has_no_leeway() {
    let now = Utc::now();
    let claims = Claims {
        user_id: "user-123".to_string(),
        user_type: "trainer".to_string(),
        email: "trainer@fitline.app".to_string(),
        jti: "just-expired".to_string(),
        iat: (now - Duration::minutes(15)).timestamp(),
        exp: (now - Duration::seconds(5)).timestamp(),
        sub: "user-123".to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(ACCESS_SECRET.as_bytes()),
    )
    .unwrap();

    assert!(codec().verify_access_token(&token).is_err());
}

#[test]
fn test_malformed_tokens() {
    let codec = codec();
    for token in ["", "not-a-token", "a.b", "a.b.c", "...."] {
        assert_eq!(
            token_error(codec.verify_access_token(token)),
            TokenError::InvalidTokenFormat,
            "{:?}",
            token
        );
    }
}

#[test]
fn test_subject_must_match_user_id() {
    let mut claims = Claims::new("user-123", "trainer", "a@x.com", Duration::minutes(5)).unwrap();
    claims.sub = "someone-else".to_string();
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(ACCESS_SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(
        token_error(codec().verify_access_token(&token)),
        TokenError::InvalidTokenFormat
    );
}

#[test]
fn test_codec_rejects_inconsistent_config() {
    let mut config = test_config();
    config.refresh_token_secret = config.access_token_secret.clone();
    assert!(matches!(
        TokenCodec::new(&config),
        Err(DomainError::Validation { .. })
    ));

    let mut config = test_config();
    config.refresh_token_ttl = config.access_token_ttl;
    assert!(TokenCodec::new(&config).is_err());

    let config = TokenServiceConfig {
        access_token_secret: String::new(),
        ..test_config()
    };
    assert!(TokenCodec::new(&config).is_err());
}

#[test]
fn test_codec_rejects_refresh_lifetime_beyond_maximum() {
    let config = TokenServiceConfig {
        refresh_token_ttl: Duration::days(366),
        ..test_config()
    };
    assert!(matches!(
        TokenCodec::new(&config),
        Err(DomainError::Validation { .. })
    ));

    let config = TokenServiceConfig {
        refresh_token_ttl: Duration::days(365),
        ..test_config()
    };
    assert!(TokenCodec::new(&config).is_ok());
}

#[test]
fn test_config_debug_redacts_secrets() {
    let rendered = format!("{:?}", test_config());
    assert!(!rendered.contains(ACCESS_SECRET));
    assert!(rendered.contains("<redacted>"));
}
