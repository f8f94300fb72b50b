//! The `DocumentStore` trait, the repository adapter every service talks to.
//!
//! The trait is implemented by storage backends (e.g. `bufete-store-sqlite`,
//! or [`crate::MemoryStore`]). Services are handed a store at construction
//! time, so tests substitute a fake without touching the network.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fresh random document key: a UUIDv4 in simple (32 hex digit) form.
pub fn generate_id() -> String { Uuid::new_v4().simple().to_string() }

// ─── Document ────────────────────────────────────────────────────────────────

/// One persisted record: its key within the collection and its JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
  pub id:   String,
  pub data: serde_json::Value,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a document-store backend.
///
/// Documents are grouped into named collections and addressed by a string
/// key. All writes are whole-document overwrites.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  /// Generate a fresh, unused document key. No I/O is performed.
  fn new_id(&self) -> String;

  /// Fetch one document. Returns `None` if the key is absent.
  fn get<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Document>, Self::Error>> + Send + 'a;

  /// Write `data` under `id`, creating the document or replacing it whole.
  fn set<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
    data: serde_json::Value,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the document at `id`. Deleting an absent key is not an error.
  fn delete<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Every document in the collection, in the backend's native order.
  fn list<'a>(
    &'a self,
    collection: &'a str,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + 'a;
}
