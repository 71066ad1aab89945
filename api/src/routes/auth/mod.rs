//! Authentication route handlers
//!
//! This module contains the session endpoints:
//! - Token refresh
//! - Logout
//! - Current identity

pub mod logout;
pub mod me;
pub mod refresh;

use std::sync::Arc;

use fl_core::repositories::TokenRepository;
use fl_core::services::token::TokenService;

/// Shared state for the auth routes
pub struct AppState<T: TokenRepository> {
    pub token_service: Arc<TokenService<T>>,
}

impl<T: TokenRepository> AppState<T> {
    pub fn new(token_service: Arc<TokenService<T>>) -> Self {
        Self { token_service }
    }
}
