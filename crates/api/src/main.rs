//! `redteam-api` -- red-team test orchestration backend.
//!
//! Accepts white/black box test submissions, runs them in the background,
//! and reports progress and results to the configured webhook sink. See
//! [`ServerConfig::from_env`] for the environment variables it reads.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redteam_api::background;
use redteam_api::config::ServerConfig;
use redteam_api::engine::{JobDispatcher, RandomMetrics, RunRegistry};
use redteam_api::router::build_app_router;
use redteam_api::state::AppState;
use redteam_events::{Notifier, WebhookNotifier};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "redteam_api=debug,redteam_events=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });
    tracing::info!(
        host = %config.host,
        port = config.port,
        webhook_url = %config.webhook_url,
        milestone_delay_ms = config.milestone_delay_ms,
        "Loaded server configuration",
    );

    let addr: SocketAddr = match config.host.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::new(ip, config.port),
        Err(e) => {
            tracing::error!(host = %config.host, error = %e, "Invalid HOST address");
            std::process::exit(1);
        }
    };

    // --- Notifier ---
    let notifier = WebhookNotifier::new(config.webhook_url.clone(), config.webhook_timeout())
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build webhook HTTP client");
            std::process::exit(1);
        });

    // --- Engine ---
    let registry = RunRegistry::new();
    let dispatcher = JobDispatcher::new(
        Arc::new(notifier) as Arc<dyn Notifier>,
        Arc::new(RandomMetrics),
        registry.clone(),
        config.milestone_delay(),
    );

    // Spawn run retention sweeper.
    let retention_cancel = CancellationToken::new();
    let retention_handle = tokio::spawn(background::run_retention::run(
        registry.clone(),
        config.run_retention(),
        retention_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        dispatcher: Arc::new(dispatcher),
        registry,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind to address");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    retention_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), retention_handle).await;
    tracing::info!("Run retention job stopped");

    // In-flight runs are detached and not awaited.
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
