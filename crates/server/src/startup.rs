use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};
use service::auth::{repo::seaorm::SeaOrmUserDirectory, AuthService, TokenService};
use service::polls::{repo::seaorm::SeaOrmPollRepository, PollService};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load config.toml, falling back to environment variables when the file is absent
pub fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(file_err) => {
            warn!(err = %file_err, "config.toml unavailable or invalid, using environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Wire SeaORM-backed services into the router state
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> ServerState {
    let polls = PollService::new(Arc::new(SeaOrmPollRepository::new(db.clone())));
    let tokens = TokenService::new(cfg.auth.jwt_secret.clone(), cfg.auth.token_ttl_minutes);
    let auth = AuthService::new(tokens, Arc::new(SeaOrmUserDirectory { db }));
    ServerState { polls: Arc::new(polls), auth: Arc::new(auth) }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::test_connection(&db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None).await?;
    info!(event = "migrated", "database schema up to date");

    let state = build_state(db, &cfg);
    let app: Router = routes::build_router(state, build_cors(), &cfg.server.api_prefix);

    // Bind and serve
    let addr = bind_addr(&cfg)?;
    info!(%addr, api_prefix = %cfg.server.api_prefix, "starting poll server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!(event = "shutdown_signal", "draining connections");
        })
        .await?;
    Ok(())
}
