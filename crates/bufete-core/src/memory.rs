//! [`MemoryStore`]: a process-local [`DocumentStore`].
//!
//! Nothing survives a restart. Collections enumerate in key order.

use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;

use crate::{
  Error,
  store::{Document, DocumentStore, generate_id},
};

type Collection = BTreeMap<String, serde_json::Value>;

/// A document store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
  collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl DocumentStore for MemoryStore {
  type Error = Error;

  fn new_id(&self) -> String { generate_id() }

  async fn get(
    &self,
    collection: &str,
    id: &str,
  ) -> Result<Option<Document>, Error> {
    let collections = self.collections.read().await;
    Ok(
      collections
        .get(collection)
        .and_then(|c| c.get(id))
        .map(|data| Document {
          id:   id.to_owned(),
          data: data.clone(),
        }),
    )
  }

  async fn set(
    &self,
    collection: &str,
    id: &str,
    data: serde_json::Value,
  ) -> Result<(), Error> {
    self
      .collections
      .write()
      .await
      .entry(collection.to_owned())
      .or_default()
      .insert(id.to_owned(), data);
    Ok(())
  }

  async fn delete(&self, collection: &str, id: &str) -> Result<(), Error> {
    if let Some(c) = self.collections.write().await.get_mut(collection) {
      c.remove(id);
    }
    Ok(())
  }

  async fn list(&self, collection: &str) -> Result<Vec<Document>, Error> {
    let collections = self.collections.read().await;
    Ok(
      collections
        .get(collection)
        .map(|c| {
          c.iter()
            .map(|(id, data)| Document {
              id:   id.clone(),
              data: data.clone(),
            })
            .collect()
        })
        .unwrap_or_default(),
    )
  }
}
