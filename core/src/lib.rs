// marketplace/src/lib.rs

//! Client-side state layer for a small e-commerce marketplace.
//!
//! The crate provides:
//!  - A catalog store mirroring a remote `items` table, seeding any missing
//!    sample products exactly once.
//!  - A cart store persisted to durable local storage on every mutation.
//!  - A navigation guard over the application's route table.
//!  - Formatting helpers for prices, dates, and avatars.
//!
//! Remote data, sessions, and local storage are reached through traits
//! (`ItemsTable`, `SessionProvider`, `LocalStorage`) so any transport can sit
//! behind them. In-process implementations are included.

pub mod app;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod navigation;
pub mod remote;
pub mod state;
pub mod storage;
pub mod util;

// --- Re-exports for the Public API ---

pub use crate::app::Marketplace;
pub use crate::cart::{CartState, CartStore};
pub use crate::catalog::{CatalogState, CatalogStore, FetchOutcome};
pub use crate::config::MarketConfig;
pub use crate::error::{MarketError, MarketResult};
pub use crate::model::{seed_items, CartEntry, CatalogItem, ItemId, ItemRecord, NewItem, SeedItem, SellerId};
pub use crate::navigation::{Navigation, NavigationGuard, Session, SessionProvider, StaticSession};
pub use crate::remote::{ItemsTable, MemoryItemsTable};
pub use crate::storage::{FileStorage, LocalStorage, MemoryStorage};

/*
    Typical start-up:
    1. `MarketConfig::from_env()?`
    2. Build the collaborators: an `ItemsTable`, a `LocalStorage`, a `SessionProvider`.
    3. `Marketplace::new(config, remote, storage, sessions)`.
    4. `marketplace.start().await` for the first catalog sync.
    5. Views read `catalog().market_items()` and `cart().total_price()`.
*/
