mod config;
mod routes;
mod services;
mod state;

use std::process::ExitCode;

use crate::config::{Config, ConfigError};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to bind port {port}: {source}")]
    Bind { port: u16, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "apexdev stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    tracing::info!(
        site_dir = %config.site_dir.display(),
        contact_delay = ?config.contact_delay,
        queue_capacity = config.queue_capacity,
        "configuration loaded"
    );

    let (inbox, drain) = services::inbox::spawn_inbox(config.queue_capacity);
    let state = state::AppState::new(&config, inbox);

    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|source| StartupError::Bind { port, source })?;

    tracing::info!(%port, "apexdev listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    // The router owned the last inbox handle; wait for queued submissions to be logged.
    if let Err(e) = drain.await {
        tracing::warn!(error = %e, "contact inbox task ended abnormally");
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
