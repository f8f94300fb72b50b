//! Error types for `bufete-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No document exists under the requested key.
  #[error("{kind} not found: {id}")]
  NotFound { kind: &'static str, id: String },

  /// The backing store failed or could not be reached.
  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The store worker went away before answering.
  #[error("store call interrupted")]
  Interrupted,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
