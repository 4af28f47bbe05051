// tests/marketplace_tests.rs
mod common;
use common::*;
use marketplace::cart::DEFAULT_CART_KEY;
use marketplace::{
  FetchOutcome, LocalStorage, MarketConfig, Marketplace, MemoryItemsTable, MemoryStorage, Navigation, Session,
  StaticSession,
};
use std::sync::Arc;

fn build(config: MarketConfig, table: Arc<MemoryItemsTable>, storage: Arc<MemoryStorage>) -> Marketplace {
  Marketplace::new(config, table, storage, Arc::new(StaticSession::signed_out()))
}

#[tokio::test]
async fn test_start_syncs_catalog() {
  setup_tracing();
  let table = table_with_seeds(1);
  let market = build(MarketConfig::default(), table.clone(), Arc::new(MemoryStorage::new()));

  let outcome = market.start().await;

  assert_eq!(outcome, FetchOutcome::Synced { fetched: 1, seeded: 4 });
  assert_eq!(market.catalog().market_items().len(), 5);
  assert!(market.catalog().all_items().iter().all(|i| i.is_persisted()));
}

#[tokio::test]
async fn test_handles_share_one_store() {
  setup_tracing();
  let table = table_with_seeds(5);
  let market = build(MarketConfig::default(), table, Arc::new(MemoryStorage::new()));
  market.start().await;

  let first = market.catalog().market_items().remove(0);
  market.cart().add_to_cart(&first, 2);

  assert!(Arc::ptr_eq(&market.cart(), &market.clone().cart()));
  assert_eq!(market.cart().total_items(), 2);
}

#[tokio::test]
async fn test_configured_cart_key_is_used() {
  setup_tracing();
  let storage = Arc::new(MemoryStorage::new());
  let config = MarketConfig {
    cart_storage_key: "cart-test".to_string(),
    ..MarketConfig::default()
  };
  let market = build(config, table_with_seeds(5), storage.clone());
  market.start().await;

  let item = market.catalog().market_items().remove(0);
  market.cart().add_one(&item);

  assert!(storage.get_item("cart-test").unwrap().is_some());
  assert!(storage.get_item(DEFAULT_CART_KEY).unwrap().is_none());
}

#[tokio::test]
async fn test_existing_cart_is_loaded_at_construction() {
  setup_tracing();
  let storage = Arc::new(MemoryStorage::new());
  let table = table_with_seeds(5);
  {
    let market = build(MarketConfig::default(), table.clone(), storage.clone());
    market.start().await;
    let item = market.catalog().market_items().remove(0);
    market.cart().add_to_cart(&item, 3);
  }

  let market = build(MarketConfig::default(), table, storage);
  assert_eq!(market.cart().total_items(), 3);
}

#[tokio::test]
async fn test_navigate_uses_session_provider() {
  setup_tracing();
  let sessions = Arc::new(StaticSession::signed_out());
  let market = Marketplace::new(
    MarketConfig::default(),
    table_with_seeds(5),
    Arc::new(MemoryStorage::new()),
    sessions.clone(),
  );

  assert!(matches!(market.navigate("/checkout").await, Navigation::Redirect { .. }));
  sessions.sign_in(Session::new("user-1"));
  assert_eq!(market.navigate("/checkout").await, Navigation::Allow("checkout"));
}
