mod cleanup_tests;
mod codec_tests;

use chrono::Duration;

use crate::services::token::TokenServiceConfig;

pub(super) const ACCESS_SECRET: &str = "test-access-secret-key-12345";
pub(super) const REFRESH_SECRET: &str = "test-refresh-secret-key-67890";

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access_token_secret: ACCESS_SECRET.to_string(),
        refresh_token_secret: REFRESH_SECRET.to_string(),
        access_token_ttl: Duration::minutes(15),
        refresh_token_ttl: Duration::days(7),
    }
}
