pub mod fetch_service;
pub mod snapshot_service;
pub mod notification_service;
pub mod watch_service;

pub use fetch_service::FetchService;
pub use snapshot_service::SnapshotService;
pub use notification_service::{AlertSink, NotificationService, WebhookAlertSink};
pub use watch_service::{CycleReport, WatchService};
