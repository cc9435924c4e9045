//! Tennis Courts Reservation Service
//!
//! Serves the reservation REST API. Reads configuration from a TOML file
//! (`$TENNIS_CONFIG` or ~/.config/tennis-courts/config.toml).

use std::sync::Arc;
use std::time::Duration;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use tennis_courts::application::{ReservationService, ScheduleService};
use tennis_courts::domain::{SystemClock, UnitOfWork};
use tennis_courts::infrastructure::database::migrator::Migrator;
use tennis_courts::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use tennis_courts::{
    create_api_router, default_config_path, init_database, ApiServices, AppConfig,
    SeaOrmUnitOfWork,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = default_config_path();
    let (app_cfg, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app_cfg.logging.level)),
        )
        .init();

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!(
            "Failed to load config from {}: {}. Using defaults.",
            config_path.display(),
            e
        ),
    }

    info!("Starting Tennis Courts Reservation Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()?;
    info!("Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&app_cfg.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Services ───────────────────────────────────────────────
    let uow: Arc<dyn UnitOfWork> = Arc::new(SeaOrmUnitOfWork::new(db.clone()));
    let reservations = Arc::new(ReservationService::new(
        uow.clone(),
        Arc::new(SystemClock),
        app_cfg.booking,
    ));
    let schedules = Arc::new(ScheduleService::new(uow.clone()));
    info!(
        reservation_value = %app_cfg.booking.reservation_value,
        deposit = %app_cfg.booking.deposit,
        "Booking pricing configured"
    );

    let api_router = create_api_router(ApiServices {
        uow,
        reservations,
        schedules,
        prometheus: prometheus_handle,
    });

    // ── Shutdown handling ──────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // ── REST API server ────────────────────────────────────────
    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown.clone();
    let mut api_server = tokio::spawn(async move {
        axum::serve(listener, api_router)
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API server received shutdown signal");
            })
            .await
    });

    let drain_timeout = Duration::from_secs(app_cfg.server.shutdown_timeout);
    tokio::select! {
        result = &mut api_server => report_server_exit(result),
        _ = shutdown.wait() => {
            match tokio::time::timeout(drain_timeout, &mut api_server).await {
                Ok(result) => report_server_exit(result),
                Err(_) => {
                    warn!(
                        timeout_secs = app_cfg.server.shutdown_timeout,
                        "In-flight requests did not finish in time, aborting"
                    );
                    api_server.abort();
                }
            }
        }
    }

    // ── Final cleanup ──────────────────────────────────────────
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Tennis Courts Reservation Service shutdown complete");
    Ok(())
}

fn report_server_exit(result: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => info!("REST API server stopped"),
        Ok(Err(e)) => error!("REST API server error: {}", e),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
}
