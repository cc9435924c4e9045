//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, PaginatedResponse};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{self, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::reservations::{self, ReservationAppState};
use super::modules::schedules::{self, ScheduleHandlerState};
use crate::application::{ReservationService, ScheduleService};
use crate::domain::UnitOfWork;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Reservations
        reservations::book_reservation,
        reservations::get_reservation,
        reservations::list_reservations,
        reservations::cancel_reservation,
        reservations::reschedule_reservation,
        reservations::available_schedules,
        // Schedules
        schedules::create_schedule,
        schedules::get_schedule,
        schedules::list_schedules,
    ),
    components(
        schemas(
            ApiResponse<String>,
            ApiResponse<reservations::ReservationDto>,
            ApiResponse<schedules::ScheduleDto>,
            PaginatedResponse<reservations::ReservationDto>,
            health::HealthResponse,
            health::ComponentHealth,
            reservations::CreateReservationRequest,
            reservations::ReservationDto,
            schedules::CreateScheduleRequest,
            schedules::ScheduleDto,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Reservations", description = "Court booking, cancellation, rescheduling and availability"),
        (name = "Schedules", description = "Court slots that can be reserved"),
    ),
    info(
        title = "Tennis Courts Reservation API",
        version = "1.0.0",
        description = "REST API for booking tennis court slots",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Everything the router needs from the application layer
#[derive(Clone)]
pub struct ApiServices {
    pub uow: Arc<dyn UnitOfWork>,
    pub reservations: Arc<ReservationService>,
    pub schedules: Arc<ScheduleService>,
    pub prometheus: PrometheusHandle,
}

/// Create the API router with all routes
pub fn create_api_router(services: ApiServices) -> Router {
    let reservation_state = ReservationAppState {
        service: services.reservations.clone(),
    };

    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_reservations).post(reservations::book_reservation),
        )
        .route("/{id}", get(reservations::get_reservation))
        .route("/{id}/cancel", put(reservations::cancel_reservation))
        .route(
            "/{id}/schedule/{schedule_id}",
            put(reservations::reschedule_reservation),
        )
        .with_state(reservation_state.clone());

    let availability_routes = Router::new()
        .route("/available", get(reservations::available_schedules))
        .with_state(reservation_state);

    let schedule_routes = Router::new()
        .route(
            "/",
            get(schedules::list_schedules).post(schedules::create_schedule),
        )
        .route("/{id}", get(schedules::get_schedule))
        .with_state(ScheduleHandlerState {
            service: services.schedules,
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            uow: services.uow,
            started_at: Instant::now(),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(MetricsState {
            handle: services.prometheus,
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1/reservations", reservation_routes)
        .nest("/api/v1/reservations-schedules", availability_routes)
        .nest("/api/v1/schedules", schedule_routes)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

// ── Tests ──────────────────────────────────────────────────────
