use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use fl_api::app::create_app;
use fl_api::routes::auth::AppState;
use fl_core::repositories::TokenRepository;
use fl_core::services::token::{
    TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig,
};
use fl_infra::{DatabasePool, InMemoryTokenRepository, MySqlTokenRepository};
use fl_shared::config::{AppConfig, Environment, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment-specific file first, then a plain .env for anything left
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    info!("Starting Fitline API Server ({})", config.environment);
    if config.jwt.is_using_default_secret() {
        warn!("Using development JWT secrets; set JWT_SECRET and REFRESH_SECRET");
    }

    let token_config = TokenServiceConfig::from_jwt_config(&config.jwt);
    let cleanup_config = TokenCleanupConfig::from_env();

    if config.database.is_persistent() {
        let pool = DatabasePool::new(&config.database)
            .await
            .context("Failed to connect to the database")?;
        let repository = MySqlTokenRepository::new(pool.get_pool().clone());
        repository
            .ensure_schema()
            .await
            .context("Failed to prepare the refresh_tokens table")?;

        info!("Using MySQL refresh token store ({})", pool.get_statistics());
        let result = serve(Arc::new(repository), token_config, cleanup_config, &config.server).await;
        pool.close().await;
        result
    } else {
        warn!("DATABASE_URL not set; refresh tokens are kept in memory and lost on restart");
        serve(
            Arc::new(InMemoryTokenRepository::new()),
            token_config,
            cleanup_config,
            &config.server,
        )
        .await
    }
}

/// Wire the token service around `repository` and run the HTTP server
async fn serve<T>(
    repository: Arc<T>,
    token_config: TokenServiceConfig,
    cleanup_config: TokenCleanupConfig,
    server: &ServerConfig,
) -> anyhow::Result<()>
where
    T: TokenRepository + 'static,
{
    let token_service = Arc::new(TokenService::new(repository, token_config)?);

    let cleanup = Arc::new(TokenCleanupService::new(
        Arc::clone(&token_service),
        cleanup_config,
    ));
    let cleanup_task = cleanup.start_background_task();

    let app_state = web::Data::new(AppState::new(token_service));

    let bind_address = server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    Ok(())
}
