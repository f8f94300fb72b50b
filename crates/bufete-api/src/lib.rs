//! JSON REST API for bufete.
//!
//! Exposes an axum [`Router`] backed by any [`DocumentStore`], with one
//! resource per entity collection (`/abogados`, `/clientes`). Auth, TLS, and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = bufete_api::router(store.clone(), "https://bufete.example");
//! ```

pub mod error;
pub mod hal;
pub mod resource;

use std::sync::Arc;

use axum::{Router, routing::get};
use bufete_core::{Client, DocumentStore, Entity, EntityService, Lawyer};
use validator::Validate;

pub use error::ApiError;
use hal::Links;
use resource::Resource;

/// Path the API is nested under by [`router`].
pub const MOUNT: &str = "/api";

/// Build the full application router with the API nested under [`MOUNT`].
///
/// `base_url` is the externally visible origin used for hypermedia links and
/// `Location` headers; pass `""` for root-relative hrefs.
pub fn router<S>(store: Arc<S>, base_url: &str) -> Router<()>
where
  S: DocumentStore + 'static,
{
  let prefix = format!("{}{MOUNT}", base_url.trim_end_matches('/'));
  Router::new().nest(MOUNT, api_router(store, &prefix))
}

/// Build the API router for both collections, un-nested.
///
/// `links_prefix` is the externally visible URL this router ends up mounted
/// at. The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>, links_prefix: &str) -> Router<()>
where
  S: DocumentStore + 'static,
{
  Router::new()
    .merge(resource_router::<Lawyer, S>(
      EntityService::new(Arc::clone(&store)),
      links_prefix,
    ))
    .merge(resource_router::<Client, S>(
      EntityService::new(store),
      links_prefix,
    ))
}

/// Routes for a single collection, served at `/{collection}`.
pub fn resource_router<E, S>(
  service: EntityService<E, S>,
  links_prefix: &str,
) -> Router<()>
where
  E: Entity + Validate,
  S: DocumentStore + 'static,
{
  let collection = format!("/{}", service.collection());
  let item = format!("{collection}/{{id}}");
  let state = Resource {
    links: Links::new(links_prefix, service.collection()),
    service,
  };

  Router::new()
    .route(
      &collection,
      get(resource::list::<E, S>)
        .post(resource::create::<E, S>)
        .delete(resource::delete_all::<E, S>),
    )
    .route(
      &item,
      get(resource::get_one::<E, S>)
        .put(resource::update::<E, S>)
        .delete(resource::delete_one::<E, S>),
    )
    .with_state(state)
}
