// marketplace/src/cart/store.rs

//! The cart aggregation engine: a locally persisted list of cart entries.

use crate::model::{CartEntry, CatalogItem, ItemId};
use crate::state::StoreCell;
use crate::storage::LocalStorage;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub const DEFAULT_CART_KEY: &str = "cart";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
  /// Insertion order. At most one entry per listing.
  pub entries: Vec<CartEntry>,
  /// Whether the cart panel is shown. Never persisted.
  pub is_open: bool,
}

impl CartState {
  /// Saturates at the `i64` bounds.
  pub fn total_items(&self) -> i64 {
    self.entries.iter().fold(0i64, |acc, e| acc.saturating_add(e.quantity))
  }

  /// Saturates at the `Decimal` bounds.
  pub fn total_price(&self) -> Decimal {
    self
      .entries
      .iter()
      .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.line_total()))
  }
}

/// Shopping cart backed by durable local storage.
///
/// Every mutation rewrites the full entry list under `storage_key`.
pub struct CartStore {
  state: StoreCell<CartState>,
  storage: Arc<dyn LocalStorage>,
  storage_key: String,
}

impl CartStore {
  /// Creates the store and loads any previously persisted entries.
  pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
    Self::with_key(storage, DEFAULT_CART_KEY)
  }

  pub fn with_key(storage: Arc<dyn LocalStorage>, storage_key: impl Into<String>) -> Self {
    let store = Self {
      state: StoreCell::default(),
      storage,
      storage_key: storage_key.into(),
    };
    store.load_cart();
    store
  }

  // --- Reads ---

  pub fn entries(&self) -> Vec<CartEntry> {
    self.state.map_read(|s| s.entries.as_slice()).to_vec()
  }

  pub fn entry(&self, item_id: &ItemId) -> Option<CartEntry> {
    self
      .state
      .read()
      .entries
      .iter()
      .find(|e| e.id.as_ref() == Some(item_id))
      .cloned()
  }

  pub fn is_open(&self) -> bool {
    self.state.read().is_open
  }

  pub fn total_items(&self) -> i64 {
    self.state.read().total_items()
  }

  pub fn total_price(&self) -> Decimal {
    self.state.read().total_price()
  }

  pub fn snapshot(&self) -> CartState {
    self.state.read().clone()
  }

  // --- Mutations ---

  /// Adds `quantity` of `item`, merging into an existing entry for the same
  /// listing. Stock is not checked here. Opens the cart panel.
  #[instrument(name = "CartStore::add_to_cart", skip(self, item), fields(item_name = %item.name))]
  pub fn add_to_cart(&self, item: &CatalogItem, quantity: i64) {
    let mut state = self.state.write();
    match state.entries.iter().position(|e| same_listing(e, item)) {
      Some(idx) => {
        let existing = &mut state.entries[idx];
        existing.quantity = existing.quantity.saturating_add(quantity);
        event!(Level::DEBUG, new_quantity = existing.quantity, "Incremented cart entry.");
      }
      None => {
        state.entries.push(CartEntry::snapshot(item, quantity));
        event!(Level::DEBUG, "Appended cart entry.");
      }
    }
    state.is_open = true;
    self.persist(&state.entries);
  }

  /// Shorthand for `add_to_cart(item, 1)`.
  pub fn add_one(&self, item: &CatalogItem) {
    self.add_to_cart(item, 1);
  }

  #[instrument(name = "CartStore::remove_from_cart", skip(self))]
  pub fn remove_from_cart(&self, item_id: &ItemId) {
    let mut state = self.state.write();
    if let Some(idx) = state.entries.iter().position(|e| e.id.as_ref() == Some(item_id)) {
      state.entries.remove(idx);
      self.persist(&state.entries);
    } else {
      event!(Level::TRACE, "No cart entry to remove.");
    }
  }

  /// Sets the entry's quantity verbatim. Zero and negative values are stored as given.
  #[instrument(name = "CartStore::update_quantity", skip(self))]
  pub fn update_quantity(&self, item_id: &ItemId, quantity: i64) {
    let mut state = self.state.write();
    if let Some(entry) = state.entries.iter_mut().find(|e| e.id.as_ref() == Some(item_id)) {
      if quantity <= 0 {
        event!(Level::WARN, quantity, "Cart entry set to a non-positive quantity.");
      }
      entry.quantity = quantity;
      self.persist(&state.entries);
    }
  }

  /// Empties the cart and persists an empty list (the key is kept).
  #[instrument(name = "CartStore::clear_cart", skip(self))]
  pub fn clear_cart(&self) {
    let mut state = self.state.write();
    state.entries.clear();
    self.persist(&state.entries);
  }

  pub fn toggle_cart(&self) {
    self.state.update(|s| s.is_open = !s.is_open);
  }

  /// Replaces the in-memory entries with the persisted snapshot. A missing or
  /// unreadable snapshot yields an empty cart.
  #[instrument(name = "CartStore::load_cart", skip(self), fields(key = %self.storage_key))]
  pub fn load_cart(&self) {
    let entries = match self.storage.get_item(&self.storage_key) {
      Ok(Some(raw)) => match serde_json::from_str::<Vec<CartEntry>>(&raw) {
        Ok(entries) => entries,
        Err(e) => {
          event!(Level::WARN, error = %e, "Discarding unreadable cart snapshot.");
          Vec::new()
        }
      },
      Ok(None) => Vec::new(),
      Err(e) => {
        event!(Level::WARN, error = %e, "Cart snapshot could not be read.");
        Vec::new()
      }
    };
    event!(Level::DEBUG, count = entries.len(), "Cart loaded.");
    self.state.write().entries = entries;
  }

  fn persist(&self, entries: &[CartEntry]) {
    let encoded = match serde_json::to_string(entries) {
      Ok(encoded) => encoded,
      Err(e) => {
        event!(Level::ERROR, error = %e, "Failed to encode cart snapshot.");
        return;
      }
    };
    if let Err(e) = self.storage.set_item(&self.storage_key, &encoded) {
      event!(Level::ERROR, error = %e, "Failed to persist cart snapshot.");
    }
  }
}

/// Listings are matched by id; unpersisted listings (no id) by name.
fn same_listing(entry: &CartEntry, item: &CatalogItem) -> bool {
  match (&entry.id, &item.id) {
    (Some(a), Some(b)) => a == b,
    (None, None) => entry.name == item.name,
    _ => false,
  }
}

impl std::fmt::Debug for CartStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartStore")
      .field("storage_key", &self.storage_key)
      .field("state", &*self.state.read())
      .finish()
  }
}
