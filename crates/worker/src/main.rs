//! `burnrack-worker` -- periodic expiry sweeper for the burn-in rack.
//!
//! Runs alongside the API server. Each pass promotes expired burns to
//! READY and dispatches the ready-for-pickup alert for each device, at
//! most once per occupancy.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default | Description                        |
//! |-----------------------|----------|---------|------------------------------------|
//! | `DATABASE_URL`        | yes      | --      | Postgres connection string         |
//! | `SLACK_WEBHOOK_URL`   | no       | --      | Incoming webhook for pickup alerts |
//! | `SWEEP_INTERVAL_SECS` | no       | `60`    | Seconds between sweep passes       |

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use burnrack_db::SlotRepo;
use burnrack_notify::SlackWebhook;

mod sweep_loop;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "burnrack_worker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = burnrack_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    burnrack_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    burnrack_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let repo = SlotRepo::new(pool);
    let webhook = SlackWebhook::from_env();

    let cancel = CancellationToken::new();
    let sweep_cancel = cancel.clone();
    let sweep_handle = tokio::spawn(sweep_loop::run(repo, webhook, sweep_cancel));

    shutdown_signal().await;

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the sweeper
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
