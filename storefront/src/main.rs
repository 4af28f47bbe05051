// storefront/src/main.rs

use marketplace::util::{avatar_text, format_currency, format_date, truncate_text, DEFAULT_TRUNCATE_LENGTH};
use marketplace::{
  FetchOutcome, FileStorage, MarketConfig, Marketplace, MemoryItemsTable, NewItem, Session, SellerId, StaticSession,
};

use anyhow::Context;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront...");

  let config = MarketConfig::from_env().context("loading marketplace configuration")?;
  let storage = FileStorage::open(&config.storage_dir)
    .with_context(|| format!("opening local storage at {}", config.storage_dir.display()))?;

  // The remote table already holds two of the sample products.
  let remote = Arc::new(MemoryItemsTable::new());
  remote.preload(marketplace::seed_items().iter().take(2).map(|seed| seed.to_new_item()));

  let sessions = Arc::new(StaticSession::signed_out());
  let market = Marketplace::new(config, remote.clone(), Arc::new(storage), sessions.clone());

  match market.start().await {
    FetchOutcome::Synced { fetched, seeded } => {
      tracing::info!(fetched, seeded, "Catalog synchronized.");
    }
    FetchOutcome::FellBackToSeed => {
      tracing::warn!(error = ?market.catalog().last_error(), "Catalog unavailable; showing sample items.");
    }
  }

  let catalog = market.catalog();
  for item in catalog.market_items() {
    tracing::info!(
      name = %item.name,
      price = %format_currency(item.price),
      stock = item.quantity,
      description = %truncate_text(item.description.as_deref().unwrap_or_default(), DEFAULT_TRUNCATE_LENGTH),
      "Listed"
    );
  }

  let cart = market.cart();
  let listed = catalog.market_items();
  if let Some(first) = listed.first() {
    cart.add_to_cart(first, 2);
  }
  if let Some(second) = listed.get(1) {
    cart.add_one(second);
  }
  tracing::info!(
    items = cart.total_items(),
    total = %format_currency(cart.total_price()),
    "Cart updated."
  );

  // Checkout is gated behind sign-in.
  tracing::info!(outcome = ?market.navigate("/checkout").await, "Navigating while signed out.");
  let session = Session::new("seller-1");
  tracing::info!(avatar = %avatar_text("Juan dela Cruz"), user = %session.user_id, "Signing in.");
  sessions.sign_in(session);
  tracing::info!(outcome = ?market.navigate("/checkout").await, "Navigating while signed in.");

  // Sell what is in the cart.
  for entry in cart.entries() {
    let Some(id) = entry.id.as_ref() else {
      continue;
    };
    let Some(listing) = catalog.find_item(id) else {
      continue;
    };
    if let Err(e) = catalog.update_item_quantity(id, listing.quantity - entry.quantity).await {
      tracing::error!(error = %e, item = %entry.name, "Stock update failed.");
    }
  }
  cart.clear_cart();

  let listing = NewItem::new("Banig Sleeping Mat", Decimal::new(120_000, 2), 4)
    .with_seller(SellerId::new("seller-1"))
    .with_description("Handwoven from dried buri palm leaves.");
  if let Some(created) = catalog.add_item(listing).await {
    tracing::info!(name = %created.name, id = ?created.id, "Listed a new item.");
  }

  tracing::info!(
    catalog_size = catalog.all_items().len(),
    remote_rows = remote.rows().len(),
    at = %format_date(&Utc::now()),
    "Storefront session finished."
  );
  Ok(())
}
