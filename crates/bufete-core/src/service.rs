//! [`EntityService`]: CRUD over one named collection in domain terms.
//!
//! Every call is a single awaited round trip to the store (or, for
//! [`EntityService::delete_all`], one listing plus one delete per document).
//! Store faults are converted into [`crate::Error`] and returned unchanged;
//! nothing is retried.

use std::{marker::PhantomData, sync::Arc};

use crate::{
  Error, Result,
  entity::Entity,
  model::{Client, Lawyer},
  store::{Document, DocumentStore},
};

pub type LawyerService<S> = EntityService<Lawyer, S>;
pub type ClientService<S> = EntityService<Client, S>;

/// Domain-level CRUD for entities of type `E` stored in `S`.
///
/// Holds no per-request state: only the shared store handle and the
/// collection name. Cloning is cheap.
pub struct EntityService<E, S> {
  store:      Arc<S>,
  collection: String,
  _entity:    PhantomData<fn() -> E>,
}

impl<E, S> Clone for EntityService<E, S> {
  fn clone(&self) -> Self {
    Self {
      store:      Arc::clone(&self.store),
      collection: self.collection.clone(),
      _entity:    PhantomData,
    }
  }
}

impl<E, S> EntityService<E, S>
where
  E: Entity,
  S: DocumentStore,
{
  /// A service over `E`'s default collection.
  pub fn new(store: Arc<S>) -> Self {
    Self::with_collection(store, E::COLLECTION)
  }

  /// A service over an explicitly named collection.
  pub fn with_collection(store: Arc<S>, collection: impl Into<String>) -> Self {
    Self {
      store,
      collection: collection.into(),
      _entity: PhantomData,
    }
  }

  pub fn collection(&self) -> &str { &self.collection }

  /// All entities in the collection, in the store's enumeration order.
  pub async fn list(&self) -> Result<Vec<E>> {
    let docs = self
      .store
      .list(&self.collection)
      .await
      .map_err(Into::<Error>::into)?;
    tracing::debug!(collection = %self.collection, count = docs.len(), "listed");
    docs.into_iter().map(decode::<E>).collect()
  }

  /// Whether the collection holds no documents.
  pub async fn is_empty(&self) -> Result<bool> {
    let docs = self
      .store
      .list(&self.collection)
      .await
      .map_err(Into::<Error>::into)?;
    Ok(docs.is_empty())
  }

  /// Fetch the entity stored under `id`.
  pub async fn get(&self, id: &str) -> Result<E> {
    tracing::debug!(collection = %self.collection, id, "get");
    let doc = self
      .store
      .get(&self.collection, id)
      .await
      .map_err(Into::<Error>::into)?
      .ok_or_else(|| Error::NotFound {
        kind: E::KIND,
        id:   id.to_owned(),
      })?;
    decode(doc)
  }

  /// Persist a new entity under a freshly generated id and return it with
  /// that id set. Any id already on `entity` is discarded.
  pub async fn create(&self, mut entity: E) -> Result<E> {
    let id = self.store.new_id();
    entity.set_id(id);
    self.write(&entity).await?;
    tracing::debug!(collection = %self.collection, id = entity.id(), "created");
    Ok(entity)
  }

  /// Overwrite the document at `id` with `entity`, forcing its id to `id`.
  ///
  /// No existence check is made: updating an unknown id creates it.
  pub async fn update(&self, id: &str, mut entity: E) -> Result<E> {
    entity.set_id(id.to_owned());
    self.write(&entity).await?;
    tracing::debug!(collection = %self.collection, id, "updated");
    Ok(entity)
  }

  /// Delete the document at `id`. Absent ids are not an error.
  pub async fn delete(&self, id: &str) -> Result<()> {
    self
      .store
      .delete(&self.collection, id)
      .await
      .map_err(Into::<Error>::into)?;
    tracing::debug!(collection = %self.collection, id, "deleted");
    Ok(())
  }

  /// Delete every document currently in the collection, one call per
  /// document, and return how many were deleted.
  ///
  /// Not atomic: a failing delete stops the batch and leaves the documents
  /// already removed deleted.
  pub async fn delete_all(&self) -> Result<usize> {
    let docs = self
      .store
      .list(&self.collection)
      .await
      .map_err(Into::<Error>::into)?;
    for doc in &docs {
      self
        .store
        .delete(&self.collection, &doc.id)
        .await
        .map_err(Into::<Error>::into)?;
    }
    tracing::info!(collection = %self.collection, count = docs.len(), "deleted all");
    Ok(docs.len())
  }

  async fn write(&self, entity: &E) -> Result<()> {
    let data = serde_json::to_value(entity)?;
    self
      .store
      .set(&self.collection, entity.id(), data)
      .await
      .map_err(Into::<Error>::into)
  }
}

/// Deserialise a stored document, restoring its id from the document key.
fn decode<E: Entity>(doc: Document) -> Result<E> {
  let mut entity: E = serde_json::from_value(doc.data)?;
  entity.set_id(doc.id);
  Ok(entity)
}
