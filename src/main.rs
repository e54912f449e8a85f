//! Rental Service
//!
//! REST API for reserving rentable resources.
//! Reads configuration from TOML file (~/.config/rental-service/config.toml).

use std::sync::Arc;
use std::time::Duration;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rental_core::application::{ListingService, ReservationService};
use rental_core::config::{LogFormat, LoggingConfig};
use rental_core::infrastructure::database::migrator::Migrator;
use rental_core::shared::{abort_after_grace, listen_for_shutdown_signals, CancelSignal};
use rental_core::{
    config_path, create_api_router, init_database, AppConfig, AppState, SeaOrmRepositoryProvider,
};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = config_path();
    let app_cfg = match AppConfig::load_optional(&config_path) {
        Ok(Some(cfg)) => {
            init_tracing(&cfg.logging);
            info!(path = %config_path.display(), "Configuration loaded");
            cfg
        }
        Ok(None) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg.logging);
            warn!(path = %config_path.display(), "Config file not found, using defaults");
            cfg
        }
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            error!(path = %config_path.display(), error = %e, "Failed to load config");
            return Err(e.into());
        }
    };

    info!("Starting Rental Service...");

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&app_cfg.database).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!(error = %e, "Failed to run migrations");
        return Err(e.into());
    }
    info!("Database migrations completed");

    // ── Services ───────────────────────────────────────────────
    let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let reservations = Arc::new(ReservationService::new(repos.clone(), app_cfg.pricing));
    let listing = Arc::new(ListingService::new(repos, app_cfg.listing.limits()));

    let grace = Duration::from_secs(app_cfg.server.shutdown_timeout);
    let shutdown = CancelSignal::new();
    let abort = CancelSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));
    tokio::spawn(abort_after_grace(shutdown.clone(), abort.clone(), grace));

    let state = AppState::new(
        reservations,
        listing,
        abort,
        app_cfg.server.request_timeout(),
    )
    .with_database(db.clone());

    // ── REST API ───────────────────────────────────────────────
    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!(address = %api_addr, "REST API server listening");
    info!(url = %format!("http://{api_addr}/docs"), "Swagger UI available");

    let api_shutdown = shutdown.clone();
    let server = axum::serve(listener, create_api_router(state)).with_graceful_shutdown(async move {
        api_shutdown.cancelled().await;
        info!("🛑 REST API server received shutdown signal");
    });
    let mut server_task = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server_task => {
            match result {
                Ok(Ok(())) => info!("REST API server stopped"),
                Ok(Err(e)) => error!(error = %e, "REST API server error"),
                Err(e) => error!(error = %e, "REST API server task panicked"),
            }
        }
        _ = shutdown.cancelled() => {
            info!(timeout_secs = grace.as_secs(), "Waiting for in-flight requests");
            // requests aborted at the end of the grace period still need to answer
            let drain = grace + Duration::from_secs(1);
            match tokio::time::timeout(drain, &mut server_task).await {
                Ok(_) => info!("REST API server drained"),
                Err(_) => {
                    warn!("Shutdown timeout elapsed, aborting remaining requests");
                    server_task.abort();
                }
            }
        }
    }

    if let Err(e) = db.close().await {
        warn!(error = %e, "Failed to close database connection");
    }

    info!("👋 Rental Service shutdown complete");
    Ok(())
}
