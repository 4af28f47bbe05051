// marketplace/src/model/mod.rs

//! Data structures shared by the stores and their collaborators.

pub mod cart_entry;
pub mod catalog_item;
pub mod record;
pub mod seed;

pub use cart_entry::CartEntry;
pub use catalog_item::{CatalogItem, ItemId, NewItem, SellerId};
pub use record::ItemRecord;
pub use seed::{seed_items, SeedItem};
