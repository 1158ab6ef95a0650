use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use acct_api::app::create_app;
use acct_api::routes::AppState;
use acct_api::telemetry;
use acct_core::services::{AccountService, SigningKeys, TokenService, TokenServiceConfig};
use acct_infra::{DatabasePool, LocalImageRepository, PgUserRepository, RedisClient, RedisTokenRepository};
use acct_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    telemetry::init(&config.logging)?;

    info!(
        environment = %config.environment,
        bind = %config.server.bind_address(),
        base_url = %config.server.base_url,
        "Starting account API"
    );

    let keys = SigningKeys::from_config(&config.auth).context("loading signing keys")?;

    let redis = RedisClient::new(config.cache.clone())
        .await
        .context("connecting to Redis")?;
    let token_repository = Arc::new(RedisTokenRepository::new(redis));

    let database = DatabasePool::new(&config.database)
        .await
        .context("connecting to Postgres")?;
    let user_repository = Arc::new(PgUserRepository::new(database.get_pool().clone()));
    let image_repository = Arc::new(LocalImageRepository::from_config(&config.storage));

    let state = web::Data::new(AppState::new(
        AccountService::new(user_repository, image_repository),
        TokenService::new(token_repository, keys, TokenServiceConfig::from(&config.auth)),
        config.server.max_body_bytes,
    ));

    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &server_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(config.server.bind_address())
        .with_context(|| format!("binding {}", config.server.bind_address()))?
        .run()
        .await?;

    database.close().await;
    info!("Account API stopped");
    Ok(())
}
