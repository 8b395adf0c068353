//! DevPath auth API server.
//!
//! Wires the MySQL token store, the MySQL credential store, and the Redis
//! revocation registry into the session services and serves them over
//! actix-web.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use log::{info, warn};

use dp_core::repositories::TokenRepository;
use dp_core::services::session::SessionService;
use dp_core::services::token::{TokenService, TokenServiceConfig};
use dp_infra::cache::{RedisClient, RedisRevocationRegistry};
use dp_infra::database::{DatabasePool, MySqlCredentialStore, MySqlTokenRepository};
use dp_shared::config::auth::JwtConfig;
use dp_shared::config::cache::CacheConfig;
use dp_shared::config::database::DatabaseConfig;
use dp_shared::config::server::ServerConfig;

use dp_api::app::{create_app, AppState};

fn to_io_error(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting DevPath auth API server");

    let jwt_config = JwtConfig::from_env();
    if jwt_config.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    let server_config = ServerConfig::from_env();
    let fail_open = std::env::var("GATEWAY_FAIL_OPEN")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    if fail_open {
        warn!("Revocation gate configured to fail open on registry outages");
    }

    let pool = DatabasePool::new(DatabaseConfig::from_env())
        .await
        .map_err(to_io_error)?;
    let redis_client = RedisClient::new(CacheConfig::from_env())
        .await
        .map_err(to_io_error)?;

    let token_repository = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));
    let credential_store = Arc::new(MySqlCredentialStore::new(pool.get_pool().clone()));
    let registry = Arc::new(RedisRevocationRegistry::new(redis_client));

    // Expired rows are logically dead already; sweeping them only
    // reclaims space.
    {
        let sweeper = Arc::clone(&token_repository);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(3600));
            loop {
                interval.tick().await;
                match sweeper.delete_expired().await {
                    Ok(0) => {}
                    Ok(swept) => info!("swept {} expired refresh tokens", swept),
                    Err(e) => warn!("expired-token sweep failed: {}", e),
                }
            }
        });
    }

    let token_service = Arc::new(
        TokenService::new(
            token_repository,
            Arc::clone(&registry),
            TokenServiceConfig::from(jwt_config.clone()),
        )
        .map_err(to_io_error)?,
    );
    let session_service = Arc::new(SessionService::new(credential_store, token_service));

    let app_state = web::Data::new(AppState {
        session_service,
        registry,
    });

    let bind_address = server_config.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &jwt_config, fail_open)
    });
    if server_config.workers > 0 {
        server = server.workers(server_config.workers);
    }

    server.bind(&bind_address)?.run().await
}
