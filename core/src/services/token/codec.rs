//! Stateless signing and verification of access and refresh tokens

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Which key pair a token is signed with. Never written into the token.
#[derive(Debug, Clone, Copy)]
enum TokenKind {
    Access,
    Refresh,
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Issues and verifies HS256 tokens for both token kinds
///
/// Holds only immutable keys and lifetimes, so a single instance can be
/// shared behind an `Arc` by any number of concurrent callers.
pub struct TokenCodec {
    access_keys: KeyPair,
    refresh_keys: KeyPair,
    access_ttl: Duration,
    refresh_ttl: Duration,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec from a validated configuration
    ///
    /// # Returns
    ///
    /// A new `TokenCodec`, or `DomainError::Validation` if the secrets are
    /// empty or equal, or the lifetimes are inconsistent
    pub fn new(config: &TokenServiceConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            access_keys: KeyPair::from_secret(&config.access_token_secret),
            refresh_keys: KeyPair::from_secret(&config.refresh_token_secret),
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
            validation,
        })
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issues an access token for the given identity
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed token
    /// * `Err(DomainError)` - `TokenError::MissingIdentity` if any field is empty
    pub fn issue_access_token(
        &self,
        user_id: &str,
        user_type: &str,
        email: &str,
    ) -> Result<String, DomainError> {
        self.issue(TokenKind::Access, user_id, user_type, email)
    }

    /// Issues a refresh token for the given identity
    ///
    /// Same shape as an access token, signed with the refresh secret and
    /// living for the refresh lifetime.
    pub fn issue_refresh_token(
        &self,
        user_id: &str,
        user_type: &str,
        email: &str,
    ) -> Result<String, DomainError> {
        self.issue(TokenKind::Refresh, user_id, user_type, email)
    }

    /// Verifies an access token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature and expiry are valid
    /// * `Err(DomainError)` - `InvalidSignature`, `TokenExpired` or `InvalidTokenFormat`
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify(TokenKind::Access, token)
    }

    /// Verifies a refresh token and returns its claims
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify(TokenKind::Refresh, token)
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access_keys,
            TokenKind::Refresh => &self.refresh_keys,
        }
    }

    fn issue(
        &self,
        kind: TokenKind,
        user_id: &str,
        user_type: &str,
        email: &str,
    ) -> Result<String, DomainError> {
        require_identity_field("user_id", user_id)?;
        require_identity_field("user_type", user_type)?;
        require_identity_field("email", email)?;

        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims::new(user_id, user_type, email, ttl)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys(kind).encoding)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn verify(&self, kind: TokenKind, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)
            .map_err(|e| {
                DomainError::Token(match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::InvalidTokenFormat,
                })
            })?;

        let claims = token_data.claims;
        if claims.user_id.is_empty() || claims.sub != claims.user_id {
            return Err(DomainError::Token(TokenError::InvalidTokenFormat));
        }
        Ok(claims)
    }
}

fn require_identity_field(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::Token(TokenError::MissingIdentity { field }));
    }
    Ok(())
}
