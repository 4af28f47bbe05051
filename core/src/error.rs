// marketplace/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
  #[error("Remote query on table '{table}' failed: {message}")]
  RemoteQuery { table: String, message: String },

  #[error("Remote insert into table '{table}' failed: {message}")]
  RemoteInsert { table: String, message: String },

  #[error("Remote update of item '{item_id}' failed: {message}")]
  RemoteUpdate { item_id: String, message: String },

  #[error("Local storage error for key '{key}': {message}")]
  Storage { key: String, message: String },

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Malformed record (field '{field}'): {message}")]
  MalformedRecord { field: &'static str, message: String },

  #[error("Session lookup failed: {0}")]
  Session(String),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Error in an external collaborator. Source: {source}")]
  External {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal marketplace error: {0}")]
  Internal(String),
}

impl MarketError {
  pub(crate) fn malformed(field: &'static str, message: impl Into<String>) -> Self {
    MarketError::MalformedRecord {
      field,
      message: message.into(),
    }
  }
}

// Collaborator implementations are free to use anyhow internally.
impl From<AnyhowError> for MarketError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<MarketError>() {
      Ok(market_err) => market_err,
      Err(err) => MarketError::External { source: err },
    }
  }
}

pub type MarketResult<T, E = MarketError> = std::result::Result<T, E>;
