// marketplace/src/catalog/store.rs

//! The catalog synchronization engine.
//!
//! `CatalogStore` mirrors the remote `items` table in memory and makes sure the
//! compiled-in seed products exist there exactly once, inserting only the ones
//! whose names are missing. Reconciliation runs at most once per store
//! lifetime unless the remote table turns out to be empty.

use crate::error::{MarketError, MarketResult};
use crate::model::catalog_item::TEMP_ID_PREFIX;
use crate::model::record::validate_records;
use crate::model::seed::seed_items;
use crate::model::{CatalogItem, ItemId, NewItem, SeedItem, SellerId};
use crate::remote::ItemsTable;
use crate::state::StoreCell;
use crate::util::{generate_id, Debouncer};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{event, instrument, Level};

pub const DEFAULT_PRELOAD_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
  /// Newest-first as returned by the remote table; reconciled seed rows are appended.
  pub all_items: Vec<CatalogItem>,
  pub is_loading: bool,
  pub last_error: Option<String>,
  pub seed_reconciled: bool,
  pub first_item_loaded: bool,
}

impl CatalogState {
  pub fn market_items(&self) -> Vec<CatalogItem> {
    self.all_items.iter().filter(|i| i.in_stock()).cloned().collect()
  }

  pub fn user_items(&self, seller_id: Option<&SellerId>) -> Vec<CatalogItem> {
    let Some(seller_id) = seller_id else {
      return Vec::new();
    };
    self
      .all_items
      .iter()
      .filter(|i| i.seller_id.as_ref() == Some(seller_id))
      .cloned()
      .collect()
  }

  fn persisted_names(&self) -> HashSet<&str> {
    self
      .all_items
      .iter()
      .filter(|i| i.is_persisted())
      .map(|i| i.name.as_str())
      .collect()
  }
}

/// Result of one `fetch_all_items` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
  /// The remote table answered. `seeded` rows were inserted by reconciliation.
  Synced { fetched: usize, seeded: usize },
  /// The remote query failed; the local seed set is shown instead.
  FellBackToSeed,
}

pub struct CatalogStore {
  state: StoreCell<CatalogState>,
  remote: Arc<dyn ItemsTable>,
  seeds: Vec<SeedItem>,
  // Single slot: overlapping fetches queue behind the one in flight.
  fetch_gate: tokio::sync::Mutex<()>,
  preload_debouncer: Debouncer,
}

impl CatalogStore {
  pub fn new(remote: Arc<dyn ItemsTable>) -> Self {
    Self {
      state: StoreCell::default(),
      remote,
      seeds: seed_items().to_vec(),
      fetch_gate: tokio::sync::Mutex::new(()),
      preload_debouncer: Debouncer::new(DEFAULT_PRELOAD_DEBOUNCE),
    }
  }

  /// Replaces the compiled-in seed dataset.
  pub fn with_seed_items(mut self, seeds: Vec<SeedItem>) -> Self {
    self.seeds = seeds;
    self
  }

  pub fn with_preload_debounce(mut self, delay: Duration) -> Self {
    self.preload_debouncer = Debouncer::new(delay);
    self
  }

  // --- Reads ---

  pub fn all_items(&self) -> Vec<CatalogItem> {
    self.state.map_read(|s| s.all_items.as_slice()).to_vec()
  }

  /// Items with stock left.
  pub fn market_items(&self) -> Vec<CatalogItem> {
    self.state.read().market_items()
  }

  /// Items listed by `seller_id`; empty when no seller is given.
  pub fn user_items(&self, seller_id: Option<&SellerId>) -> Vec<CatalogItem> {
    self.state.read().user_items(seller_id)
  }

  pub fn find_item(&self, item_id: &ItemId) -> Option<CatalogItem> {
    self
      .state
      .read()
      .all_items
      .iter()
      .find(|i| i.id.as_ref() == Some(item_id))
      .cloned()
  }

  pub fn is_loading(&self) -> bool {
    self.state.read().is_loading
  }

  pub fn last_error(&self) -> Option<String> {
    self.state.read().last_error.clone()
  }

  pub fn seed_reconciled(&self) -> bool {
    self.state.read().seed_reconciled
  }

  pub fn snapshot(&self) -> CatalogState {
    self.state.read().clone()
  }

  pub fn seeds(&self) -> &[SeedItem] {
    &self.seeds
  }

  // --- Synchronization ---

  /// Loads the catalog from the remote table and reconciles it against the
  /// seed dataset. Never fails: a query error falls back to the local seed set
  /// and is exposed through `last_error`.
  #[instrument(name = "CatalogStore::fetch_all_items", skip(self), ret)]
  pub async fn fetch_all_items(&self, force_refresh: bool) -> FetchOutcome {
    let _in_flight = self.fetch_gate.lock().await;

    self.state.update(|s| {
      s.is_loading = true;
      s.last_error = None;
    });

    let outcome = self.sync_with_remote(force_refresh).await;

    self.state.write().is_loading = false;
    outcome
  }

  async fn sync_with_remote(&self, force_refresh: bool) -> FetchOutcome {
    let records = match self.remote.select_all_newest_first().await {
      Ok(records) => records,
      Err(e) => {
        event!(Level::WARN, error = %e, "Catalog query failed; showing local seed items.");
        let fallback: Vec<CatalogItem> = self.seeds.iter().map(SeedItem::to_local_item).collect();
        self.state.update(|s| {
          s.last_error = Some(e.to_string());
          s.all_items = fallback;
        });
        return FetchOutcome::FellBackToSeed;
      }
    };

    // Names count as present even when their row fails validation, so a
    // malformed seed row is never inserted a second time.
    let remote_names: HashSet<String> = records
      .iter()
      .filter_map(|r| r.name.as_deref())
      .map(str::trim)
      .filter(|name| !name.is_empty())
      .map(str::to_string)
      .collect();
    let raw_count = records.len();
    let fetched = validate_records(records);
    let fetched_count = fetched.len();

    if raw_count == 0 {
      event!(Level::INFO, "Remote catalog is empty; seeding every sample item.");
      self.state.write().all_items = Vec::new();
      let seeded = self.reconcile_seed_items(self.seeds.clone(), &remote_names).await;
      self.state.write().seed_reconciled = true;
      return FetchOutcome::Synced { fetched: 0, seeded };
    }

    let missing: Vec<SeedItem> = self
      .seeds
      .iter()
      .filter(|seed| !remote_names.contains(seed.name))
      .copied()
      .collect();
    event!(
      Level::INFO,
      fetched = fetched_count,
      skipped = raw_count - fetched_count,
      missing_seed_items = missing.len(),
      "Catalog fetched."
    );

    let already_reconciled = self.state.update(|s| {
      s.all_items = fetched;
      s.seed_reconciled
    });

    let mut seeded = 0;
    if (!missing.is_empty() || force_refresh) && !already_reconciled {
      let batch = if force_refresh { self.seeds.clone() } else { missing };
      seeded = self.reconcile_seed_items(batch, &remote_names).await;
      self.state.write().seed_reconciled = true;
    }

    FetchOutcome::Synced {
      fetched: fetched_count,
      seeded,
    }
  }

  /// Inserts the given seed items remotely in a single batch and merges the
  /// persisted rows. Returns how many rows were merged.
  ///
  /// Items whose name is already held with a persisted id, or was seen in the
  /// last remote answer, are not sent again. On insert failure the items are
  /// shown locally without ids.
  #[instrument(name = "CatalogStore::reconcile_seed_items", skip_all, fields(requested = items.len()))]
  async fn reconcile_seed_items(&self, items: Vec<SeedItem>, remote_names: &HashSet<String>) -> usize {
    if items.is_empty() {
      return 0;
    }

    let pending: Vec<SeedItem> = {
      let state = self.state.read();
      let present = state.persisted_names();
      let pending: Vec<SeedItem> = items
        .into_iter()
        .filter(|seed| !present.contains(seed.name) && !remote_names.contains(seed.name))
        .collect();
      pending
    };
    if pending.is_empty() {
      event!(Level::DEBUG, "Every requested seed item is already persisted.");
      return 0;
    }

    let payload: Vec<NewItem> = pending.iter().map(SeedItem::to_new_item).collect();
    match self.remote.insert_batch(payload).await {
      Ok(rows) => {
        let inserted = validate_records(rows);
        let mut state = self.state.write();
        let known_ids: HashSet<ItemId> = state.all_items.iter().filter_map(|i| i.id.clone()).collect();
        let new_items: Vec<CatalogItem> = inserted
          .into_iter()
          .filter(|i| i.id.as_ref().map_or(false, |id| !known_ids.contains(id)))
          .collect();
        let merged = new_items.len();
        state.all_items.extend(new_items);
        event!(Level::INFO, merged, "Seed items persisted.");
        merged
      }
      Err(e) => {
        event!(Level::ERROR, error = %e, "Seeding insert failed; keeping seed items local only.");
        let mut state = self.state.write();
        for seed in &pending {
          if !state.all_items.iter().any(|i| i.name == seed.name) {
            state.all_items.push(seed.to_local_item());
          }
        }
        0
      }
    }
  }

  // --- Mutations ---

  /// Writes the new stock count remotely, then applies it locally. A quantity of
  /// zero or less removes the item from the catalog. Local state is untouched
  /// when the remote update fails.
  #[instrument(name = "CatalogStore::update_item_quantity", skip(self), err(Display))]
  pub async fn update_item_quantity(&self, item_id: &ItemId, new_quantity: i64) -> MarketResult<()> {
    if item_id.is_temporary() {
      return Err(MarketError::Internal(format!(
        "item '{}' is a local placeholder and has no remote row",
        item_id
      )));
    }

    // Stock never goes below zero remotely; a negative row would not validate.
    if let Err(e) = self.remote.update_quantity(item_id, new_quantity.max(0)).await {
      self.state.write().last_error = Some(e.to_string());
      return Err(e);
    }

    let mut state = self.state.write();
    if new_quantity <= 0 {
      state.all_items.retain(|i| i.id.as_ref() != Some(item_id));
      event!(Level::DEBUG, "Item sold out and removed from catalog.");
    } else if let Some(item) = state.all_items.iter_mut().find(|i| i.id.as_ref() == Some(item_id)) {
      item.quantity = new_quantity;
    }
    Ok(())
  }

  /// Lists a new item. The persisted row is placed first in the catalog.
  #[instrument(name = "CatalogStore::add_item", skip_all, fields(name = %item.name))]
  pub async fn add_item(&self, item: NewItem) -> Option<CatalogItem> {
    let record = match self.remote.insert_one(item).await {
      Ok(record) => record,
      Err(e) => {
        event!(Level::ERROR, error = %e, "Failed to list item.");
        return None;
      }
    };

    match CatalogItem::try_from(record) {
      Ok(created) => {
        self.state.write().all_items.insert(0, created.clone());
        Some(created)
      }
      Err(e) => {
        event!(Level::ERROR, error = %e, "Remote returned a malformed row for the new item.");
        None
      }
    }
  }

  // --- First-item preload ---

  /// Shows the first seed item immediately, before any remote answer, under a
  /// temporary id. Runs once per store. Returns whether a placeholder was added.
  pub fn preload_first_item(&self) -> bool {
    preload_into(&self.state, self.seeds.first().copied())
  }

  /// Debounced `preload_first_item`; bursts of calls collapse into one.
  /// Must be called from within a tokio runtime.
  pub fn schedule_preload(&self) {
    let state = self.state.clone();
    let first = self.seeds.first().copied();
    self.preload_debouncer.call(move || async move {
      preload_into(&state, first);
    });
  }
}

fn preload_into(state: &StoreCell<CatalogState>, first: Option<SeedItem>) -> bool {
  let Some(first) = first else {
    return false;
  };

  let mut state = state.write();
  if state.first_item_loaded {
    return false;
  }
  state.first_item_loaded = true;

  if state.all_items.iter().any(|i| i.name == first.name) {
    return false;
  }

  let mut placeholder = first.to_local_item();
  placeholder.id = Some(ItemId(format!("{}{}", TEMP_ID_PREFIX, generate_id())));
  state.all_items.insert(0, placeholder);
  event!(Level::DEBUG, name = first.name, "First seed item preloaded.");
  true
}

impl std::fmt::Debug for CatalogStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CatalogStore")
      .field("table", &self.remote.table_name())
      .field("seeds", &self.seeds.len())
      .field("state", &*self.state.read())
      .finish()
  }
}
