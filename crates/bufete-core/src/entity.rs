//! The [`Entity`] trait implemented by every persisted record type.

use serde::{Serialize, de::DeserializeOwned};

/// A record that lives in its own document collection and is addressed by a
/// store-assigned string key.
pub trait Entity:
  Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
  /// Default collection name; also the URL path segment under `/api`.
  const COLLECTION: &'static str;
  /// Human-readable kind used in error messages and logs.
  const KIND: &'static str;

  fn id(&self) -> &str;

  fn set_id(&mut self, id: String);
}
