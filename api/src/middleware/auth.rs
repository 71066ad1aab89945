//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the access token from the `Authorization` header, verifies it
//! with the shared [`TokenCodec`], and attaches a typed [`AuthContext`] to
//! the request. Every rejection produces the same 401 body; the reason is
//! only logged.

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use fl_core::{domain::entities::token::Claims, services::token::TokenCodec};
use fl_shared::errors::ErrorResponse;
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

/// Verified identity injected into requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    /// User ID from the token subject
    pub user_id: String,
    /// User type / role
    pub user_type: String,
    /// User email
    pub email: String,
    /// JWT ID, for log correlation
    pub token_id: String,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            user_type: claims.user_type,
            email: claims.email,
            token_id: claims.jti,
        }
    }
}

/// The uniform authorization failure
pub fn unauthorized_error() -> Error {
    InternalError::from_response(
        "Authentication required",
        HttpResponse::Unauthorized().json(ErrorResponse::unauthorized()),
    )
    .into()
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    codec: Arc<TokenCodec>,
}

impl JwtAuth {
    /// Creates a new JWT authentication middleware verifying with `codec`
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            codec: Arc::clone(&self.codec),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    codec: Arc<TokenCodec>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let codec = Arc::clone(&self.codec);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    log::debug!("Rejected {}: missing or malformed Authorization header", req.path());
                    return Err(unauthorized_error());
                }
            };

            let claims = match codec.verify_access_token(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    log::debug!("Rejected {}: access token verification failed: {}", req.path(), e);
                    return Err(unauthorized_error());
                }
            };

            req.extensions_mut().insert(AuthContext::from(claims));

            service.call(req).await
        })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header
///
/// Exactly two space-separated fields, the first being `Bearer`.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let parts: Vec<&str> = header.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Some(token.to_string()),
        _ => None,
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(unauthorized_error);

        ready(result)
    }
}
