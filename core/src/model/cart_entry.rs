// marketplace/src/model/cart_entry.rs

use super::catalog_item::{CatalogItem, ItemId, SellerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of the shopping cart.
///
/// Fields other than `quantity` are a snapshot of the catalog item taken when it
/// was first added; later catalog changes do not flow into existing entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
  pub id: Option<ItemId>,
  pub name: String,
  pub price: Decimal,
  #[serde(default)]
  pub image: Option<String>,
  pub quantity: i64,
  #[serde(default)]
  pub seller_id: Option<SellerId>,
}

impl CartEntry {
  pub fn snapshot(item: &CatalogItem, quantity: i64) -> Self {
    Self {
      id: item.id.clone(),
      name: item.name.clone(),
      price: item.price,
      image: item.image.clone(),
      quantity,
      seller_id: item.seller_id.clone(),
    }
  }

  /// `price × quantity`, saturating at the `Decimal` bounds.
  pub fn line_total(&self) -> Decimal {
    self.price.saturating_mul(Decimal::from(self.quantity))
  }
}
