// marketplace/src/storage/mod.rs

//! Durable local key-value storage, the client-side counterpart of a browser's
//! `localStorage`. Values are strings; callers own the encoding.

pub mod file;
pub mod memory;

use crate::error::MarketResult;

pub use file::FileStorage;
pub use memory::MemoryStorage;

pub trait LocalStorage: Send + Sync + 'static {
  /// `Ok(None)` when nothing is stored under `key`.
  fn get_item(&self, key: &str) -> MarketResult<Option<String>>;

  /// Overwrites any previous value.
  fn set_item(&self, key: &str, value: &str) -> MarketResult<()>;

  fn remove_item(&self, key: &str) -> MarketResult<()>;
}
