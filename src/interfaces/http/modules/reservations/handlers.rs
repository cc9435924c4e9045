//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::*;
use crate::application::ReservationService;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, DateRangeQuery, PagedDateRangeQuery, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::modules::schedules::ScheduleDto;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub service: Arc<ReservationService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation booked", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Slot in the past or already taken"),
        (status = 404, description = "Schedule not found"),
        (status = 422, description = "Invalid body")
    )
)]
pub async fn book_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), ApiError> {
    let reservation = state
        .service
        .book_reservation(request.guest_id, request.schedule_id)
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(reservation.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError> {
    let reservation = state
        .service
        .find_reservation(id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(PagedDateRangeQuery),
    responses(
        (status = 200, description = "Reservations created within the dates", body = ApiResponse<PaginatedResponse<ReservationDto>>)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Query(query): Query<PagedDateRangeQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<ReservationDto>>>, ApiError> {
    let (start, end) = query.bounds();
    let page = state
        .service
        .find_reservations_by_date(start, end, query.pagination())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        page,
        ReservationDto::from,
    ))))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}/cancel",
    tag = "Reservations",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Not cancellable"),
        (status = 404, description = "Not found")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError> {
    let reservation = state
        .service
        .cancel_reservation(id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}/schedule/{schedule_id}",
    tag = "Reservations",
    params(
        ("id" = i64, Path, description = "Reservation to move"),
        ("schedule_id" = i64, Path, description = "Target schedule")
    ),
    responses(
        (status = 200, description = "New reservation on the target slot", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Not reschedulable or slot taken"),
        (status = 404, description = "Reservation or schedule not found")
    )
)]
pub async fn reschedule_reservation(
    State(state): State<ReservationAppState>,
    Path((id, schedule_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError> {
    let reservation = state
        .service
        .reschedule_reservation(id, schedule_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations-schedules/available",
    tag = "Reservations",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Unbooked schedules within the dates", body = ApiResponse<Vec<ScheduleDto>>)
    )
)]
pub async fn available_schedules(
    State(state): State<ReservationAppState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<ScheduleDto>>>, ApiError> {
    let (start, end) = range.bounds();
    let schedules = state
        .service
        .find_available_schedules(start, end)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        schedules.into_iter().map(ScheduleDto::from).collect(),
    )))
}
