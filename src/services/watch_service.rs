use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::detector::{ChangeDetector, Classification, Detection, DetectorState};
use crate::domain::Alert;
use crate::scheduler::Cycle;
use crate::services::{AlertSink, FetchService, NotificationService, SnapshotService};
use crate::sources::CollectionSource;
use crate::storage::SnapshotStore;

/// Outcome of one fetch → persist → detect → notify pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub classification: Classification,
    pub fetch_count: usize,
    pub new_items: usize,
    pub persisted: bool,
    pub notified: bool,
}

/// Owns the detector state and drives one cycle at a time
pub struct WatchService<S: CollectionSource, T: SnapshotStore, A: AlertSink> {
    fetch_service: FetchService<S>,
    snapshot_service: SnapshotService<T>,
    detector: ChangeDetector,
    notification_service: NotificationService<A>,
    state: DetectorState,
}

impl<S: CollectionSource, T: SnapshotStore, A: AlertSink> WatchService<S, T, A> {
    pub fn new(
        fetch_service: FetchService<S>,
        snapshot_service: SnapshotService<T>,
        detector: ChangeDetector,
        notification_service: NotificationService<A>,
    ) -> Self {
        Self {
            fetch_service,
            snapshot_service,
            detector,
            notification_service,
            state: DetectorState::default(),
        }
    }

    pub fn state(&self) -> &DetectorState {
        &self.state
    }

    pub async fn check_for_new_items(&mut self) -> CycleReport {
        let timestamp = Utc::now();
        let items = self.fetch_service.fetch().await;

        // Every fetch is saved, including empty ones
        let persisted = self.snapshot_service.persist(&items, timestamp).await;

        let detection = self.detector.classify(&items, &self.state);
        self.log_detection(&detection);

        let mut notified = false;
        if detection.has_new_items() {
            let alert = Alert::new(
                detection.new_items.to_vec(),
                detection.previous.last_seen_count(),
                detection.state.last_seen_count(),
                detection.previous.last_seen_id().map(str::to_string),
                detection.current_id().map(str::to_string),
            );
            for line in alert.item_lines(self.detector.id_field()) {
                info!("{}", line);
            }
            notified = self.notification_service.notify(&alert).await;
        }

        let report = CycleReport {
            classification: detection.classification,
            fetch_count: items.len(),
            new_items: detection.new_items.len(),
            persisted,
            notified,
        };

        self.state = detection.state;
        report
    }

    fn log_detection(&self, detection: &Detection<'_>) {
        let previous_id = detection.previous.last_seen_id().unwrap_or("none");
        let latest_id = detection.current_id().unwrap_or("none");
        let total = detection.state.last_seen_count();

        match detection.classification {
            Classification::NoData => warn!("No news items received"),
            Classification::FirstObservation => {
                info!(latest_id, total, "Initialized tracking")
            }
            Classification::NoChange => info!(latest_id, total, "No new items"),
            Classification::Reordered => info!(
                "Items reordered - Latest ID changed: {} → {}",
                previous_id, latest_id
            ),
            Classification::NewItems => {
                warn!("{}", Alert::banner("NEW ITEMS DETECTED!"));
                info!(
                    "Previous count: {} → Current count: {}",
                    detection.previous.last_seen_count(),
                    total
                );
                info!("New items found: {}", detection.new_items.len());
                info!("Latest ID changed: {} → {}", previous_id, latest_id);
            }
        }
    }
}

#[async_trait]
impl<S, T, A> Cycle for WatchService<S, T, A>
where
    S: CollectionSource,
    T: SnapshotStore,
    A: AlertSink,
{
    async fn run_cycle(&mut self) -> CycleReport {
        self.check_for_new_items().await
    }
}
