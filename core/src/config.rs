// marketplace/src/config.rs

use crate::cart::DEFAULT_CART_KEY;
use crate::catalog::DEFAULT_PRELOAD_DEBOUNCE;
use crate::error::{MarketError, MarketResult};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
  /// Local storage key holding the cart snapshot.
  pub cart_storage_key: String,
  /// Directory backing `FileStorage`.
  pub storage_dir: PathBuf,
  pub preload_debounce: Duration,
  /// Reconcile the full seed set on the first fetch even if nothing is missing.
  pub force_refresh: bool,
}

impl Default for MarketConfig {
  fn default() -> Self {
    Self {
      cart_storage_key: DEFAULT_CART_KEY.to_string(),
      storage_dir: PathBuf::from(".marketplace"),
      preload_debounce: DEFAULT_PRELOAD_DEBOUNCE,
      force_refresh: false,
    }
  }
}

impl MarketConfig {
  /// Reads `.env` (if present) and then the process environment.
  pub fn from_env() -> MarketResult<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from an arbitrary variable source. Unset variables take
  /// their defaults; set-but-invalid ones are errors.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MarketResult<Self> {
    let defaults = Self::default();

    let cart_storage_key = lookup("MARKET_CART_KEY").unwrap_or(defaults.cart_storage_key);
    if cart_storage_key.trim().is_empty() {
      return Err(MarketError::Config("MARKET_CART_KEY must not be empty".to_string()));
    }

    let storage_dir = lookup("MARKET_STORAGE_DIR")
      .map(PathBuf::from)
      .unwrap_or(defaults.storage_dir);

    let preload_debounce = match lookup("MARKET_PRELOAD_DEBOUNCE_MS") {
      Some(raw) => Duration::from_millis(
        raw
          .parse::<u64>()
          .map_err(|e| MarketError::Config(format!("Invalid MARKET_PRELOAD_DEBOUNCE_MS '{}': {}", raw, e)))?,
      ),
      None => defaults.preload_debounce,
    };

    let force_refresh = match lookup("MARKET_FORCE_REFRESH") {
      Some(raw) => raw
        .parse::<bool>()
        .map_err(|e| MarketError::Config(format!("Invalid MARKET_FORCE_REFRESH '{}': {}", raw, e)))?,
      None => defaults.force_refresh,
    };

    tracing::debug!(
      cart_storage_key = %cart_storage_key,
      storage_dir = %storage_dir.display(),
      "Marketplace configuration loaded."
    );

    Ok(Self {
      cart_storage_key,
      storage_dir,
      preload_debounce,
      force_refresh,
    })
  }
}
