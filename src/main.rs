use std::process;

use sqlx::postgres::PgPoolOptions;
use status_api::{
    app,
    config::{Config, ConfigError},
    telemetry::{get_subscriber, init_subscriber},
};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let subscriber = get_subscriber("status-api".into(), "info".into(), std::io::stdout);
    if let Err(e) = init_subscriber(subscriber) {
        eprintln!("Failed to install tracing subscriber: {e}");
        process::exit(1);
    }

    if let Err(e) = run().await {
        error!(error = %e, "Refusing to start");
        process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let db_pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await?;
    info!(database = %config.database_name, "Connected to database");

    sqlx::migrate!().run(&db_pool).await?;

    let listener = TcpListener::bind(config.bind_address).await?;
    info!(address = %config.bind_address, "Server starting");

    let served = axum::serve(listener, app(db_pool.clone(), &config))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    info!("Server stopped, closing database pool");
    db_pool.close().await;

    served?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
