// marketplace/src/model/catalog_item.rs

//! Catalog listing types: the validated `CatalogItem`, its identifiers, and the
//! `NewItem` insert payload.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a persisted catalog row. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
  pub fn new(id: impl Into<String>) -> Self {
    ItemId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Placeholder ids are handed out locally and never sent to the remote table.
  pub fn is_temporary(&self) -> bool {
    self.0.starts_with(TEMP_ID_PREFIX)
  }
}

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

pub(crate) const TEMP_ID_PREFIX: &str = "temp-id-";

/// Identifier of the user who listed an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(pub String);

impl SellerId {
  pub fn new(id: impl Into<String>) -> Self {
    SellerId(id.into())
  }
}

impl fmt::Display for SellerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A product listing as held by the catalog store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
  /// `None` until the item has been persisted remotely.
  pub id: Option<ItemId>,
  pub name: String,
  pub price: Decimal,
  pub quantity: i64,
  pub seller_id: Option<SellerId>,
  pub image: Option<String>,
  pub description: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

impl CatalogItem {
  pub fn is_persisted(&self) -> bool {
    self.id.as_ref().map_or(false, |id| !id.is_temporary())
  }

  pub fn in_stock(&self) -> bool {
    self.quantity > 0
  }
}

/// Insert payload for the remote `items` table. Carries no id or timestamp;
/// both are assigned by the remote side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
  pub name: String,
  pub price: Decimal,
  pub quantity: i64,
  pub seller_id: Option<SellerId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl NewItem {
  pub fn new(name: impl Into<String>, price: Decimal, quantity: i64) -> Self {
    Self {
      name: name.into(),
      price,
      quantity,
      seller_id: None,
      image: None,
      description: None,
    }
  }

  pub fn with_seller(mut self, seller_id: SellerId) -> Self {
    self.seller_id = Some(seller_id);
    self
  }

  pub fn with_image(mut self, image: impl Into<String>) -> Self {
    self.image = Some(image.into());
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }
}
