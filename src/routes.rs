// Route handlers
//
// Each endpoint is registered explicitly in `router` and is a single-shot
// request/response function: validate the input, look up or filter the static
// tables (or ask a mock backend), wrap the result in an envelope and pick the
// status code.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::filter::{find_by_id, first_values, non_empty, AccommodationFilter};
use crate::state::AppState;

pub const ACCOMMODATION_PATH: &str = "/accommodation";
pub const PACKAGES_PATH: &str = "/packages";
pub const PACKAGE_DETAIL_PATH: &str = "/packages/:id";
pub const PAYMENT_VERIFY_PATH: &str = "/payment/verify";
pub const SGR_AVAILABILITY_PATH: &str = "/sgr/availability";
pub const HEALTH_PATH: &str = "/health";

// Fallback route name when the query does not carry one
pub const UNKNOWN_ROUTE: &str = "Unknown";

pub const ROUTE_ID_PARAM: &str = "routeId";
pub const DATE_PARAM: &str = "date";
pub const CLASS_PARAM: &str = "class";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ACCOMMODATION_PATH, get(accommodation_list_handler))
        .route(PACKAGES_PATH, get(package_list_handler))
        .route(PACKAGE_DETAIL_PATH, get(package_detail_handler))
        .route(PAYMENT_VERIFY_PATH, post(payment_verify_handler))
        .route(SGR_AVAILABILITY_PATH, get(sgr_availability_handler))
        .route(HEALTH_PATH, get(health_handler))
        .with_state(state)
}

fn error_response(state: &AppState, error: ApiError) -> Response {
    warn!(code = ?error.code(), status = %error.status(), "{}", error);
    ApiResponse::<()>::from_error(&error, state.now()).with_status(error.status())
}

pub async fn accommodation_list_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let filter = AccommodationFilter::from_query(&first_values(pairs));
    let accommodations = filter.apply(state.dataset.accommodations());

    ApiResponse::success(accommodations, state.now()).with_status(StatusCode::OK)
}

pub async fn package_list_handler(State(state): State<AppState>) -> Response {
    ApiResponse::success(state.dataset.packages(), state.now()).with_status(StatusCode::OK)
}

pub async fn package_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match find_by_id(state.dataset.packages(), &id) {
        Some(package) => {
            debug!(id = %id, "Package found");
            ApiResponse::success(package, state.now()).with_status(StatusCode::OK)
        }
        None => error_response(&state, ApiError::PackageNotFound(id)),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl VerifyPaymentRequest {
    // The body is read as JSON whatever the Content-Type says. No body at all
    // is the same as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }
}

pub async fn payment_verify_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match VerifyPaymentRequest::from_body(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Malformed payment verification body");
            return (StatusCode::BAD_REQUEST, "Malformed JSON body").into_response();
        }
    };

    // An empty id counts as missing
    let transaction_id = match request.transaction_id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => return error_response(&state, ApiError::MissingTransactionId),
    };

    let payment = state.payments.verify(&transaction_id).await;
    ApiResponse::success(payment, state.now()).with_status(StatusCode::OK)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub route_id: Option<String>,
    pub date: Option<String>,
    // Accepted for compatibility, does not affect the answer
    pub travel_class: Option<String>,
}

impl AvailabilityQuery {
    // Same rules as the accommodation filters: empty values are absent and
    // the first of a repeated key wins
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            route_id: non_empty(params, ROUTE_ID_PARAM).map(str::to_string),
            date: non_empty(params, DATE_PARAM).map(str::to_string),
            travel_class: non_empty(params, CLASS_PARAM).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAvailability {
    pub route: String,
    pub date: String,
    pub available_seats: u32,
}

pub async fn sgr_availability_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let now = state.now();
    let query = AvailabilityQuery::from_query(&first_values(pairs));

    let route = query.route_id.unwrap_or_else(|| UNKNOWN_ROUTE.to_string());
    let date = query.date.unwrap_or_else(|| now.format("%Y-%m-%d").to_string());

    let availability = SeatAvailability {
        route,
        date,
        available_seats: state.seats.available_seats(),
    };
    debug!(
        route = %availability.route,
        date = %availability.date,
        travel_class = ?query.travel_class,
        seats = availability.available_seats,
        "Mock SGR availability"
    );

    ApiResponse::success(availability, now).with_status(StatusCode::OK)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub accommodations: usize,
    pub packages: usize,
}

pub async fn health_handler(State(state): State<AppState>) -> Response {
    let health = HealthStatus {
        status: "ok".to_string(),
        accommodations: state.dataset.accommodations().len(),
        packages: state.dataset.packages().len(),
    };
    ApiResponse::success(health, state.now()).with_status(StatusCode::OK)
}
