// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use marketplace::{
  seed_items, CartStore, CatalogItem, CatalogStore, ItemId, MemoryItemsTable, MemoryStorage, NewItem, SeedItem,
  SellerId,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Remote table fixtures ---

pub fn seed_names() -> Vec<&'static str> {
  seed_items().iter().map(|s| s.name).collect()
}

/// A remote table already holding the first `count` seed items.
pub fn table_with_seeds(count: usize) -> Arc<MemoryItemsTable> {
  let table = Arc::new(MemoryItemsTable::new());
  table.preload(seed_items().iter().take(count).map(SeedItem::to_new_item));
  table
}

pub fn slow_table(latency: Duration) -> Arc<MemoryItemsTable> {
  Arc::new(MemoryItemsTable::new().with_latency(latency))
}

pub fn catalog_over(table: &Arc<MemoryItemsTable>) -> CatalogStore {
  CatalogStore::new(table.clone())
}

/// Number of remote rows carrying `name`.
pub fn remote_count(table: &MemoryItemsTable, name: &str) -> usize {
  table
    .rows()
    .iter()
    .filter(|r| r.name.as_deref() == Some(name))
    .count()
}

pub fn inserted_names(table: &MemoryItemsTable) -> Vec<String> {
  table
    .insert_batches()
    .into_iter()
    .flatten()
    .map(|item| item.name)
    .collect()
}

pub fn seller_listing(name: &str, seller: &str, quantity: i64) -> NewItem {
  NewItem::new(name, Decimal::new(25_000, 2), quantity).with_seller(SellerId::new(seller))
}

// --- Cart fixtures ---

pub fn product(id: &str, name: &str, price: Decimal, quantity: i64) -> CatalogItem {
  CatalogItem {
    id: Some(ItemId::new(id)),
    name: name.to_string(),
    price,
    quantity,
    seller_id: None,
    image: Some(format!("/images/{}.jpg", id)),
    description: None,
    created_at: None,
  }
}

pub fn unpersisted_product(name: &str, price: Decimal) -> CatalogItem {
  CatalogItem {
    id: None,
    ..product("unused", name, price, 10)
  }
}

/// A: 100.00, B: 50.50
pub fn sample_products() -> (CatalogItem, CatalogItem) {
  (
    product("item-a", "Product A", Decimal::new(10_000, 2), 10),
    product("item-b", "Product B", Decimal::new(5_050, 2), 10),
  )
}

pub fn memory_cart() -> (Arc<MemoryStorage>, CartStore) {
  let storage = Arc::new(MemoryStorage::new());
  let cart = CartStore::new(storage.clone());
  (storage, cart)
}
