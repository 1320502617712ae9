use std::convert::Infallible;

use serde::Serialize;
use warp::{reject, Filter, Rejection, Reply};

use crate::facility_store::FacilityStore;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub timestamp: String,
}

/// The initial snapshot load failed (or hasn't happened yet), so there is
/// nothing to serve
#[derive(Debug)]
pub struct SnapshotUnavailableError;
impl reject::Reject for SnapshotUnavailableError {}

#[derive(Debug)]
pub struct NotFoundError;
impl reject::Reject for NotFoundError {}

pub fn with_store(
    store: FacilityStore,
) -> impl Filter<Extract = (FacilityStore,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;
    let timestamp = chrono::Utc::now().to_rfc3339();

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if err.find::<NotFoundError>().is_some() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Facility not found".to_string();
    } else if err.find::<SnapshotUnavailableError>().is_some() {
        code = warp::http::StatusCode::SERVICE_UNAVAILABLE;
        message = "Availability snapshot has not been loaded yet".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = warp::http::StatusCode::METHOD_NOT_ALLOWED;
        message = "Method not allowed".to_string();
    } else {
        log::error!("Unhandled rejection: {:?}", err);
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal server error".to_string();
    }

    let error_response = ErrorResponse {
        error: message,
        code: code.as_u16(),
        timestamp,
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&error_response),
        code,
    ))
}

pub fn cors() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "OPTIONS"])
}
