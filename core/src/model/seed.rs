// marketplace/src/model/seed.rs

//! The house-stocked sample catalog used to bootstrap an empty or partially
//! empty remote table.

use super::catalog_item::{CatalogItem, NewItem};
use rust_decimal::Decimal;

/// Compiled-in template for a default marketplace product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedItem {
  pub name: &'static str,
  /// Price in centavos; seed prices are always whole centavos.
  pub price_centavos: i64,
  pub quantity: i64,
  pub image: &'static str,
  pub description: &'static str,
}

impl SeedItem {
  pub fn price(&self) -> Decimal {
    Decimal::new(self.price_centavos, 2)
  }

  /// Insert payload. Seed items never carry a seller.
  pub fn to_new_item(&self) -> NewItem {
    NewItem::new(self.name, self.price(), self.quantity)
      .with_image(self.image)
      .with_description(self.description)
  }

  /// Local, not-yet-persisted copy used when the remote table is unavailable.
  pub fn to_local_item(&self) -> CatalogItem {
    CatalogItem {
      id: None,
      name: self.name.to_string(),
      price: self.price(),
      quantity: self.quantity,
      seller_id: None,
      image: Some(self.image.to_string()),
      description: Some(self.description.to_string()),
      created_at: None,
    }
  }
}

static SEED_ITEMS: [SeedItem; 5] = [
  SeedItem {
    name: "Handwoven Abaca Bag",
    price_centavos: 89_900,
    quantity: 12,
    image: "/images/items/abaca-bag.jpg",
    description: "Tote bag woven from Bicol abaca fiber with a cotton lining.",
  },
  SeedItem {
    name: "Barako Coffee Beans 500g",
    price_centavos: 45_000,
    quantity: 30,
    image: "/images/items/barako-coffee.jpg",
    description: "Whole Liberica beans from Batangas, medium-dark roast.",
  },
  SeedItem {
    name: "Capiz Shell Lamp",
    price_centavos: 1_250_000,
    quantity: 5,
    image: "/images/items/capiz-lamp.jpg",
    description: "Table lamp with a hand-cut capiz shell shade.",
  },
  SeedItem {
    name: "Dried Mangoes Pack",
    price_centavos: 18_950,
    quantity: 50,
    image: "/images/items/dried-mangoes.jpg",
    description: "Sweet Cebu mangoes, sun-dried, 200g pack.",
  },
  SeedItem {
    name: "Narra Wood Serving Board",
    price_centavos: 155_000,
    quantity: 8,
    image: "/images/items/narra-board.jpg",
    description: "Serving board carved from reclaimed narra, food-safe finish.",
  },
];

pub fn seed_items() -> &'static [SeedItem] {
  &SEED_ITEMS
}
