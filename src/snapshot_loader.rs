use std::path::Path;

use log::info;

use crate::facility::FacilityRecord;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot fetch failed: {0}")]
    Http(#[from] Box<ureq::Error>),
    #[error("snapshot file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Fetches the availability snapshot from its static URL. One fetch serves
/// the whole process until the next scheduled refresh; the snapshot is
/// treated as immutable in between.
pub fn fetch_snapshot(url: &str) -> SnapshotResult<Vec<FacilityRecord>> {
    info!("Fetching availability snapshot from {}", url);

    let mut response = ureq::get(url).call().map_err(Box::new)?;
    let body = response.body_mut().read_to_string().map_err(Box::new)?;

    parse_snapshot(&body)
}

/// Loads the snapshot from a local file instead of the network; used for
/// development and offline runs
pub fn load_snapshot_file(path: &Path) -> SnapshotResult<Vec<FacilityRecord>> {
    info!("Loading availability snapshot from {}", path.display());

    let body = std::fs::read_to_string(path)?;
    parse_snapshot(&body)
}

fn parse_snapshot(body: &str) -> SnapshotResult<Vec<FacilityRecord>> {
    let facilities: Vec<FacilityRecord> = serde_json::from_str(body)?;
    info!("Snapshot contains {} facilities", facilities.len());
    Ok(facilities)
}
