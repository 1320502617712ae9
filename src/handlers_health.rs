use std::convert::Infallible;

use serde_json::json;
use warp::{reject, Rejection, Reply};

use crate::facility_store::FacilityStore;
use crate::warp_helpers::SnapshotUnavailableError;

pub async fn health_check() -> Result<impl Reply, Infallible> {
    Ok(warp::reply::json(&json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// Ready only once the first snapshot load has succeeded
pub async fn ready_check(store: FacilityStore) -> Result<impl Reply, Rejection> {
    if store.is_empty() {
        return Err(reject::custom(SnapshotUnavailableError));
    }

    Ok(warp::reply::json(&json!({
        "status": "ready",
        "facilities": store.len(),
        "snapshot_fetched_at": store.fetched_at().map(|at| at.to_rfc3339()),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
