//! Shared HTTP building blocks: the response envelope, pagination and
//! date-range query parameters, and the domain error mapping.

mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use axum::{http::StatusCode, Json};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::domain::DomainError;
use crate::shared::types::{PaginatedResult, PaginationParams};
use crate::shared::validations::validate_pagination;

/// Standard API response envelope
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "reason"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Payload, `null` on failure
    pub data: Option<T>,
    /// Failure reason, omitted on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Map a domain failure onto a status code and envelope
pub fn domain_error(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Infrastructure(inner) => {
            error!(error = %inner, "Request failed on storage");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let message = match e {
        DomainError::Validation(msg) => msg,
        DomainError::Infrastructure(_) => "Internal server error".to_string(),
        other => other.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

/// Paginated list payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result<U>(result: PaginatedResult<U>, f: impl FnMut(U) -> T) -> Self {
        let result = result.map(f);
        Self {
            items: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

/// `start_date`/`end_date` as `YYYY-MM-DD`
///
/// The range covers `start_date 00:00` through `end_date 23:59`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// First day, `YYYY-MM-DD`
    pub start_date: NaiveDate,
    /// Last day, `YYYY-MM-DD`
    pub end_date: NaiveDate,
}

impl DateRangeQuery {
    pub fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        (start_of_day(self.start_date), end_of_day(self.end_date))
    }
}

/// Date range plus optional paging
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PagedDateRangeQuery {
    /// First day, `YYYY-MM-DD`
    pub start_date: NaiveDate,
    /// Last day, `YYYY-MM-DD`
    pub end_date: NaiveDate,
    /// Page number starting at 1. Default: 1
    pub page: Option<u64>,
    /// Items per page (1-100). Default: 20
    pub limit: Option<u64>,
}

impl PagedDateRangeQuery {
    pub fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        (start_of_day(self.start_date), end_of_day(self.end_date))
    }

    pub fn pagination(&self) -> PaginationParams {
        validate_pagination(self.page, self.limit)
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59 on `date`
fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::minutes(23 * 60 + 59)
}
