//! Hypermedia (HAL) envelopes for entity responses.
//!
//! Nothing here is persisted: links are rebuilt on every response from the
//! public base URL and the entity id.

use std::{collections::BTreeMap, sync::Arc};

use bufete_core::Entity;
use serde::Serialize;

/// Relation name of the link to the creation endpoint.
pub const REL_CREATE: &str = "crear";

/// A single hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
  pub href: String,
}

/// An entity with its `_links`; entity fields stay at the top level.
#[derive(Debug, Serialize)]
pub struct EntityModel<E> {
  #[serde(flatten)]
  pub entity: E,
  #[serde(rename = "_links")]
  pub links:  BTreeMap<String, Link>,
}

/// A collection listing: the entity models under `_embedded.<collection>`
/// plus collection-level `_links`.
#[derive(Debug, Serialize)]
pub struct CollectionModel<E> {
  #[serde(rename = "_embedded", skip_serializing_if = "BTreeMap::is_empty")]
  pub embedded: BTreeMap<String, Vec<EntityModel<E>>>,
  #[serde(rename = "_links")]
  pub links:    BTreeMap<String, Link>,
}

/// Builds hrefs for one collection.
#[derive(Debug, Clone)]
pub struct Links {
  /// Externally visible URL of the API mount, e.g. `https://host/api`.
  prefix:     Arc<str>,
  collection: Arc<str>,
}

impl Links {
  pub fn new(prefix: &str, collection: &str) -> Self {
    Self {
      prefix:     prefix.trim_end_matches('/').into(),
      collection: collection.into(),
    }
  }

  pub fn collection_href(&self) -> String {
    format!("{}/{}", self.prefix, self.collection)
  }

  pub fn item_href(&self, id: &str) -> String {
    format!("{}/{}/{}", self.prefix, self.collection, id)
  }

  /// Wrap one entity: `self`, the collection, and the create endpoint.
  pub fn entity<E: Entity>(&self, entity: E) -> EntityModel<E> {
    let links = BTreeMap::from([
      ("self".to_owned(), Link { href: self.item_href(entity.id()) }),
      (self.collection.to_string(), Link { href: self.collection_href() }),
      (REL_CREATE.to_owned(), Link { href: self.collection_href() }),
    ]);
    EntityModel { entity, links }
  }

  /// Wrap a listing: each entity plus `self` and create links.
  pub fn collection<E: Entity>(&self, entities: Vec<E>) -> CollectionModel<E> {
    let models: Vec<_> = entities.into_iter().map(|e| self.entity(e)).collect();
    let mut embedded = BTreeMap::new();
    if !models.is_empty() {
      embedded.insert(self.collection.to_string(), models);
    }
    let links = BTreeMap::from([
      ("self".to_owned(), Link { href: self.collection_href() }),
      (REL_CREATE.to_owned(), Link { href: self.collection_href() }),
    ]);
    CollectionModel { embedded, links }
  }
}

#[cfg(test)]
mod tests {
  use bufete_core::{Client, Person};

  use super::*;

  fn client(id: &str) -> Client {
    Client {
      id: id.into(),
      person: Person { first_name: "Ana".into(), ..Default::default() },
      ..Default::default()
    }
  }

  #[test]
  fn entity_links_point_at_item_and_collection() {
    let links = Links::new("http://localhost:8080/api/", "clientes");
    let value = serde_json::to_value(links.entity(client("c1"))).unwrap();

    assert_eq!(value["id"], "c1");
    assert_eq!(value["firstName"], "Ana");
    assert_eq!(value["_links"]["self"]["href"], "http://localhost:8080/api/clientes/c1");
    assert_eq!(value["_links"]["clientes"]["href"], "http://localhost:8080/api/clientes");
    assert_eq!(value["_links"]["crear"]["href"], "http://localhost:8080/api/clientes");
  }

  #[test]
  fn empty_collection_omits_embedded() {
    let links = Links::new("/api", "clientes");
    let value = serde_json::to_value(links.collection(Vec::<Client>::new())).unwrap();

    assert!(value.get("_embedded").is_none());
    assert_eq!(value["_links"]["self"]["href"], "/api/clientes");
  }

  #[test]
  fn collection_embeds_entity_models() {
    let links = Links::new("/api", "clientes");
    let value =
      serde_json::to_value(links.collection(vec![client("a"), client("b")])).unwrap();

    let items = value["_embedded"]["clientes"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["_links"]["self"]["href"], "/api/clientes/b");
  }
}
