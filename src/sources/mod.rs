pub mod traits;
pub mod http;

pub use traits::CollectionSource;
pub use http::{parse_items, HttpCollectionSource};
