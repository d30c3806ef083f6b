pub mod chart;
pub mod config;
pub mod db;
pub mod export;
pub mod forms;
pub mod models;
pub mod web;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::db::{DatabaseError, SqliteProvider};
use crate::web::flash::FlashSigner;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Server error: {0}")]
    Server(#[from] web::ServerError),

    #[error("Startup task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Read configuration, prepare the database and serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let db_config = config.db_config();
    let seed = config.seed_on_start;
    {
        let db_config = db_config.clone();
        tokio::task::spawn_blocking(move || db::initialize_database(&db_config, seed)).await??;
    }

    let app = web::admin_router(
        Arc::new(SqliteProvider::new(db_config)),
        FlashSigner::new(&config.secret_key),
        config.static_dir.clone(),
    );

    let mut server = web::start_server(&config.bind_addr(), app).await?;
    tracing::info!("Admin UI at http://{}", server.addr);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {e}");
    }
    server.shutdown();
    server.wait().await?;
    Ok(())
}
