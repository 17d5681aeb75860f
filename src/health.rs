//! health.rs
//!
//! Availability monitor for the classification service. Checked once at
//! startup and on manual refresh; never polled in the background and
//! never consulted by the submit path, so a dead health endpoint leaves
//! analysis fully usable.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use crate::api::ClassifierApi;
use crate::controller::CoreEvent;
use crate::state::HealthSnapshot;

pub struct HealthMonitor {
    snapshot: HealthSnapshot,
    api: Arc<dyn ClassifierApi>,
    tx: Sender<CoreEvent>,
}

impl HealthMonitor {
    pub fn new(api: Arc<dyn ClassifierApi>, tx: Sender<CoreEvent>) -> Self {
        HealthMonitor {
            snapshot: HealthSnapshot::unknown(),
            api,
            tx,
        }
    }

    /// Fires one health request on a worker thread. Failures produce a
    /// stamped offline snapshot instead of leaving the previous one in
    /// place, so staleness is never presented as freshness.
    pub fn check_now(&self) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        thread::spawn(move || {
            let event = match api.health() {
                Ok(snapshot) => CoreEvent::Health {
                    snapshot,
                    error: None,
                },
                Err(e) => CoreEvent::Health {
                    snapshot: HealthSnapshot::offline_now(),
                    error: Some(e),
                },
            };
            let _ = tx.send(event);
        });
    }

    /// Wholesale replacement; snapshots are never merged.
    pub fn apply(&mut self, snapshot: HealthSnapshot) {
        self.snapshot = snapshot;
    }

    pub fn current_snapshot(&self) -> &HealthSnapshot {
        &self.snapshot
    }
}
