// marketplace/src/app.rs

//! The `Marketplace` service container. It is built once at application start
//! and hands out shared handles to the stores.

use crate::cart::CartStore;
use crate::catalog::{CatalogStore, FetchOutcome};
use crate::config::MarketConfig;
use crate::navigation::{Navigation, NavigationGuard, SessionProvider};
use crate::remote::ItemsTable;
use crate::storage::LocalStorage;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Clone)]
pub struct Marketplace {
  config: MarketConfig,
  catalog: Arc<CatalogStore>,
  cart: Arc<CartStore>,
  guard: Arc<NavigationGuard>,
}

impl Marketplace {
  /// Wires the stores to their collaborators. The cart is loaded from
  /// `storage` immediately.
  pub fn new(
    config: MarketConfig,
    remote: Arc<dyn ItemsTable>,
    storage: Arc<dyn LocalStorage>,
    sessions: Arc<dyn SessionProvider>,
  ) -> Self {
    let catalog = CatalogStore::new(remote).with_preload_debounce(config.preload_debounce);
    let cart = CartStore::with_key(storage, config.cart_storage_key.clone());
    event!(
      Level::INFO,
      cart_key = %config.cart_storage_key,
      cart_entries = cart.entries().len(),
      "Marketplace services constructed."
    );

    Self {
      catalog: Arc::new(catalog),
      cart: Arc::new(cart),
      guard: Arc::new(NavigationGuard::new(sessions)),
      config,
    }
  }

  pub fn config(&self) -> &MarketConfig {
    &self.config
  }

  pub fn catalog(&self) -> Arc<CatalogStore> {
    Arc::clone(&self.catalog)
  }

  pub fn cart(&self) -> Arc<CartStore> {
    Arc::clone(&self.cart)
  }

  pub fn guard(&self) -> Arc<NavigationGuard> {
    Arc::clone(&self.guard)
  }

  /// First catalog load, honoring `MARKET_FORCE_REFRESH`.
  #[instrument(name = "Marketplace::start", skip(self))]
  pub async fn start(&self) -> FetchOutcome {
    self.catalog.preload_first_item();
    self.catalog.fetch_all_items(self.config.force_refresh).await
  }

  pub async fn navigate(&self, full_path: &str) -> Navigation {
    self.guard.resolve(full_path).await
  }
}

impl std::fmt::Debug for Marketplace {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Marketplace")
      .field("config", &self.config)
      .field("catalog", &self.catalog)
      .field("cart", &self.cart)
      .finish_non_exhaustive()
  }
}
