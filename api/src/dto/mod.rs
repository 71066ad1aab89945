//! Request and response bodies

pub mod auth;

pub use auth::{LogoutResponse, MeResponse, RefreshTokenRequest, TokenResponse};
pub use fl_shared::errors::ErrorResponse;
