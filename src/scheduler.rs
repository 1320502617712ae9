use std::thread::{self, JoinHandle};
use std::time::Duration;

use clokwerk::{Scheduler, TimeUnits};
use log::{error, info};

use crate::facility_store::FacilityStore;
use crate::snapshot_loader;

/// Periodically re-fetches the availability snapshot so a long-running
/// server doesn't serve stale booking data. Each successful refresh swaps
/// the store wholesale; a failed refresh keeps the previous snapshot.
pub struct SnapshotScheduler {
    store: FacilityStore,
    availability_url: String,
    refresh_interval_hours: u32,
}

impl SnapshotScheduler {
    pub fn new(
        store: FacilityStore,
        availability_url: String,
        refresh_interval_hours: u32,
    ) -> Self {
        Self {
            store,
            availability_url,
            refresh_interval_hours,
        }
    }

    pub fn start(self) -> JoinHandle<()> {
        let mut scheduler = Scheduler::new();

        let interval_hours = self.refresh_interval_hours;
        let store = self.store;
        let url = self.availability_url;

        scheduler
            .every(interval_hours.hours())
            .run(move || match snapshot_loader::fetch_snapshot(&url) {
                Ok(facilities) => {
                    info!(
                        "Scheduled snapshot refresh loaded {} facilities",
                        facilities.len()
                    );
                    store.replace(facilities);
                }
                Err(e) => error!("Scheduled snapshot refresh failed: {}", e),
            });

        let handle = thread::spawn(move || loop {
            scheduler.run_pending();
            thread::sleep(Duration::from_secs(60));
        });

        info!(
            "Snapshot scheduler started - refresh every {} hours",
            interval_hours
        );
        handle
    }
}
