// marketplace/src/remote/memory.rs

//! An in-process `ItemsTable` with switchable failures and call bookkeeping.
//! Backs the test suite, the benchmarks, and the storefront demo.

use super::{ItemsTable, ITEMS_TABLE};
use crate::error::{MarketError, MarketResult};
use crate::model::{ItemId, ItemRecord, NewItem};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{event, Level};

#[derive(Debug)]
pub struct MemoryItemsTable {
  rows: Mutex<Vec<ItemRecord>>,
  next_id: AtomicU64,
  epoch: DateTime<Utc>,
  latency: Option<Duration>,

  fail_select: AtomicBool,
  fail_insert: AtomicBool,
  fail_update: AtomicBool,

  select_calls: AtomicUsize,
  update_calls: AtomicUsize,
  insert_batches: Mutex<Vec<Vec<NewItem>>>,
}

impl Default for MemoryItemsTable {
  fn default() -> Self {
    Self::new()
  }
}

impl MemoryItemsTable {
  pub fn new() -> Self {
    Self {
      rows: Mutex::new(Vec::new()),
      next_id: AtomicU64::new(1),
      epoch: Utc::now(),
      latency: None,
      fail_select: AtomicBool::new(false),
      fail_insert: AtomicBool::new(false),
      fail_update: AtomicBool::new(false),
      select_calls: AtomicUsize::new(0),
      update_calls: AtomicUsize::new(0),
      insert_batches: Mutex::new(Vec::new()),
    }
  }

  /// Every call sleeps for `latency` before touching the rows.
  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = Some(latency);
    self
  }

  /// Adds rows directly, bypassing the insert bookkeeping. Returns the stored rows.
  pub fn preload(&self, items: impl IntoIterator<Item = NewItem>) -> Vec<ItemRecord> {
    let mut rows = self.rows.lock();
    items
      .into_iter()
      .map(|item| {
        let record = self.materialize(item);
        rows.push(record.clone());
        record
      })
      .collect()
  }

  /// Stores a record verbatim, malformed or not.
  pub fn push_raw(&self, record: ItemRecord) {
    self.rows.lock().push(record);
  }

  pub fn fail_select(&self, fail: bool) {
    self.fail_select.store(fail, Ordering::SeqCst);
  }

  pub fn fail_insert(&self, fail: bool) {
    self.fail_insert.store(fail, Ordering::SeqCst);
  }

  pub fn fail_update(&self, fail: bool) {
    self.fail_update.store(fail, Ordering::SeqCst);
  }

  pub fn rows(&self) -> Vec<ItemRecord> {
    self.rows.lock().clone()
  }

  pub fn select_calls(&self) -> usize {
    self.select_calls.load(Ordering::SeqCst)
  }

  pub fn update_calls(&self) -> usize {
    self.update_calls.load(Ordering::SeqCst)
  }

  /// Payloads of every successful `insert_batch` call, in call order.
  pub fn insert_batches(&self) -> Vec<Vec<NewItem>> {
    self.insert_batches.lock().clone()
  }

  fn materialize(&self, item: NewItem) -> ItemRecord {
    let n = self.next_id.fetch_add(1, Ordering::SeqCst);
    ItemRecord {
      id: Some(format!("item-{}", n)),
      name: Some(item.name),
      price: Some(item.price),
      quantity: Some(item.quantity),
      seller_id: item.seller_id.map(|s| s.0),
      image: item.image,
      description: item.description,
      // Strictly increasing so newest-first ordering is deterministic.
      created_at: Some(self.epoch + ChronoDuration::milliseconds(n as i64)),
    }
  }

  async fn simulate_latency(&self) {
    if let Some(latency) = self.latency {
      tokio::time::sleep(latency).await;
    }
  }
}

#[async_trait]
impl ItemsTable for MemoryItemsTable {
  async fn select_all_newest_first(&self) -> MarketResult<Vec<ItemRecord>> {
    self.select_calls.fetch_add(1, Ordering::SeqCst);
    self.simulate_latency().await;

    if self.fail_select.load(Ordering::SeqCst) {
      event!(Level::DEBUG, "Simulated select failure.");
      return Err(MarketError::RemoteQuery {
        table: ITEMS_TABLE.to_string(),
        message: "connection refused".to_string(),
      });
    }

    let mut rows = self.rows.lock().clone();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(rows)
  }

  async fn insert_batch(&self, items: Vec<NewItem>) -> MarketResult<Vec<ItemRecord>> {
    self.simulate_latency().await;

    if self.fail_insert.load(Ordering::SeqCst) {
      event!(Level::DEBUG, count = items.len(), "Simulated insert failure.");
      return Err(MarketError::RemoteInsert {
        table: ITEMS_TABLE.to_string(),
        message: "permission denied for table items".to_string(),
      });
    }

    self.insert_batches.lock().push(items.clone());
    let inserted = self.preload(items);
    Ok(inserted)
  }

  async fn update_quantity(&self, id: &ItemId, quantity: i64) -> MarketResult<()> {
    self.update_calls.fetch_add(1, Ordering::SeqCst);
    self.simulate_latency().await;

    if self.fail_update.load(Ordering::SeqCst) {
      return Err(MarketError::RemoteUpdate {
        item_id: id.to_string(),
        message: "simulated update failure".to_string(),
      });
    }

    let mut rows = self.rows.lock();
    match rows.iter_mut().find(|r| r.id.as_deref() == Some(id.as_str())) {
      Some(row) => {
        row.quantity = Some(quantity);
        Ok(())
      }
      None => Err(MarketError::RemoteUpdate {
        item_id: id.to_string(),
        message: "no row with that id".to_string(),
      }),
    }
  }
}
