use kb_server::{AppState, build_router, database, logger};

use kb_auth::ClaimsCodec;
use kb_config::{Config, ConfigError};

use std::error::Error;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional (development)
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting kb-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let pool = database::connect(&config.database_path()?).await?;
    info!("Database connection established");

    let secret = config
        .auth
        .token_secret
        .as_deref()
        .ok_or_else(|| ConfigError::auth("auth.token_secret is required"))?;
    let codec = ClaimsCodec::with_hs256(secret.as_bytes());

    let app_state = AppState::new(pool, codec, &config.auth, &config.limits);
    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {e}");
            std::future::pending::<()>().await;
        }
    }
}
