pub mod news_item;
pub mod snapshot;
pub mod alert;

pub use news_item::NewsItem;
pub use snapshot::PersistedSnapshot;
pub use alert::Alert;
