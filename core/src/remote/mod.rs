// marketplace/src/remote/mod.rs

//! The remote data collaborator: a tabular service over the `items` collection.
//!
//! The stores only see the `ItemsTable` trait. Transport (REST, websockets, an
//! embedded database) is the implementor's business.

pub mod memory;

use crate::error::{MarketError, MarketResult};
use crate::model::{ItemId, ItemRecord, NewItem};
use async_trait::async_trait;

pub use memory::MemoryItemsTable;

pub const ITEMS_TABLE: &str = "items";

/// Query/insert/update access to the remote `items` table.
///
/// Implementations must report failures as `Err`, never as an empty `Ok`.
#[async_trait]
pub trait ItemsTable: Send + Sync + 'static {
  fn table_name(&self) -> &str {
    ITEMS_TABLE
  }

  /// All rows, ordered by `created_at` descending.
  async fn select_all_newest_first(&self) -> MarketResult<Vec<ItemRecord>>;

  /// Inserts every item in one request and returns the persisted rows.
  async fn insert_batch(&self, items: Vec<NewItem>) -> MarketResult<Vec<ItemRecord>>;

  /// Sets the `quantity` column of a single row.
  async fn update_quantity(&self, id: &ItemId, quantity: i64) -> MarketResult<()>;

  async fn insert_one(&self, item: NewItem) -> MarketResult<ItemRecord> {
    let name = item.name.clone();
    self
      .insert_batch(vec![item])
      .await?
      .into_iter()
      .next()
      .ok_or_else(|| MarketError::RemoteInsert {
        table: self.table_name().to_string(),
        message: format!("insert of '{}' returned no rows", name),
      })
  }
}
