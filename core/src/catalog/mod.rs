// marketplace/src/catalog/mod.rs

//! Product catalog mirrored from the remote `items` table.

pub mod store;

pub use store::{CatalogState, CatalogStore, FetchOutcome, DEFAULT_PRELOAD_DEBOUNCE};
