// marketplace/src/model/record.rs

//! Wire representation of a row from the remote `items` table.
//!
//! Every field is optional here so that a partially-populated or otherwise
//! unexpected row still deserializes. `CatalogItem::try_from` is the single
//! place where a record is checked before it reaches store state.

use super::catalog_item::{CatalogItem, ItemId, SellerId};
use crate::error::MarketError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub price: Option<Decimal>,
  #[serde(default)]
  pub quantity: Option<i64>,
  #[serde(default)]
  pub seller_id: Option<String>,
  #[serde(default)]
  pub image: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<ItemRecord> for CatalogItem {
  type Error = MarketError;

  fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
    let id = match record.id {
      Some(id) if !id.trim().is_empty() => ItemId(id),
      _ => return Err(MarketError::malformed("id", "missing or empty")),
    };

    let name = match record.name {
      Some(name) if !name.trim().is_empty() => name,
      _ => return Err(MarketError::malformed("name", format!("missing or empty on item '{}'", id))),
    };

    let price = record
      .price
      .ok_or_else(|| MarketError::malformed("price", format!("missing on item '{}'", id)))?;
    if price < Decimal::ZERO {
      return Err(MarketError::malformed("price", format!("negative price {} on item '{}'", price, id)));
    }

    let quantity = record
      .quantity
      .ok_or_else(|| MarketError::malformed("quantity", format!("missing on item '{}'", id)))?;
    if quantity < 0 {
      return Err(MarketError::malformed(
        "quantity",
        format!("negative quantity {} on item '{}'", quantity, id),
      ));
    }

    Ok(CatalogItem {
      id: Some(id),
      name,
      price,
      quantity,
      seller_id: record.seller_id.filter(|s| !s.is_empty()).map(SellerId),
      image: record.image,
      description: record.description,
      created_at: record.created_at,
    })
  }
}

/// Validates a batch of records, logging and dropping the malformed ones.
pub(crate) fn validate_records(records: Vec<ItemRecord>) -> Vec<CatalogItem> {
  records
    .into_iter()
    .filter_map(|record| match CatalogItem::try_from(record) {
      Ok(item) => Some(item),
      Err(e) => {
        tracing::warn!(error = %e, "Skipping malformed item record.");
        None
      }
    })
    .collect()
}
