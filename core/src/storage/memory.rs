// marketplace/src/storage/memory.rs

use super::LocalStorage;
use crate::error::MarketResult;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Process-local storage. Survives store re-creation but not process restarts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_item(self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.items.write().insert(key.into(), value.into());
    self
  }

  pub fn len(&self) -> usize {
    self.items.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.read().is_empty()
  }
}

impl LocalStorage for MemoryStorage {
  fn get_item(&self, key: &str) -> MarketResult<Option<String>> {
    Ok(self.items.read().get(key).cloned())
  }

  fn set_item(&self, key: &str, value: &str) -> MarketResult<()> {
    self.items.write().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove_item(&self, key: &str) -> MarketResult<()> {
    self.items.write().remove(key);
    Ok(())
  }
}
