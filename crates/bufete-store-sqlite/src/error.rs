//! Error type for `bufete-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for bufete_core::Error {
  fn from(e: Error) -> Self {
    match e {
      // The connection thread is gone; the call never completed.
      Error::Database(tokio_rusqlite::Error::ConnectionClosed) => {
        bufete_core::Error::Interrupted
      }
      Error::Json(e) => bufete_core::Error::Serialization(e),
      other => bufete_core::Error::StoreUnavailable(Box::new(other)),
    }
  }
}
