//! Schedule HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::*;
use crate::application::ScheduleService;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, DateRangeQuery, ValidatedJson,
};

/// Schedule handler state
#[derive(Clone)]
pub struct ScheduleHandlerState {
    pub service: Arc<ScheduleService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/schedules",
    tag = "Schedules",
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule created", body = ApiResponse<ScheduleDto>),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Invalid window or court")
    )
)]
pub async fn create_schedule(
    State(state): State<ScheduleHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ScheduleDto>>), ApiError> {
    let created = state
        .service
        .add_schedule(request.into())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ScheduleDto::from(created))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/schedules/{id}",
    tag = "Schedules",
    params(("id" = i64, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule details", body = ApiResponse<ScheduleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_schedule(
    State(state): State<ScheduleHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ScheduleDto>>, ApiError> {
    let schedule = state.service.find_schedule(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(schedule.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/schedules",
    tag = "Schedules",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Schedules within the dates", body = ApiResponse<Vec<ScheduleDto>>)
    )
)]
pub async fn list_schedules(
    State(state): State<ScheduleHandlerState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<ScheduleDto>>>, ApiError> {
    let (start, end) = range.bounds();
    let schedules = state
        .service
        .find_schedules_by_dates(start, end)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        schedules.into_iter().map(ScheduleDto::from).collect(),
    )))
}
