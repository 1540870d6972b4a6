use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Router with default CORS, used by `run` and by integration tests.
pub fn app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_requested");
}

/// Public entry: migrate the database and serve HTTP until ctrl-c
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_and_migrate(&db_cfg).await?;

    let state = ServerState::new(db, &cfg);
    let app = app(state);

    // Bind and serve
    let addr = bind_addr(&cfg)?;
    info!(event = "server_starting", %addr);
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)?;
    info!(event = "server_stopped");
    Ok(())
}

/// Read `.env`, then `config.toml` (or env-only defaults) and validate.
pub fn load_config() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}
