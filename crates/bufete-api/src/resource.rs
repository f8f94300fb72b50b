//! Handlers for one entity collection, generic over the entity type.
//!
//! | Method   | Path            | Notes |
//! |----------|-----------------|-------|
//! | `GET`    | `/{collection}`      | HAL collection |
//! | `POST`   | `/{collection}`      | Body: entity; returns 201 + `Location` |
//! | `DELETE` | `/{collection}`      | Deletes every document; 204 |
//! | `GET`    | `/{collection}/{id}` | 404 if not found |
//! | `PUT`    | `/{collection}/{id}` | Full overwrite (upsert); id forced from path |
//! | `DELETE` | `/{collection}/{id}` | 204 whether or not it existed |

use axum::{
  Json,
  extract::{Path, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use bufete_core::{DocumentStore, Entity, EntityService};
use validator::Validate;

use crate::{
  error::ApiError,
  hal::{CollectionModel, EntityModel, Links},
};

// ─── State ───────────────────────────────────────────────────────────────────

/// Per-collection handler state: the service and its link builder.
pub struct Resource<E, S> {
  pub service: EntityService<E, S>,
  pub links:   Links,
}

impl<E, S> Clone for Resource<E, S> {
  fn clone(&self) -> Self {
    Self {
      service: self.service.clone(),
      links:   self.links.clone(),
    }
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /{collection}`
pub async fn list<E, S>(
  State(res): State<Resource<E, S>>,
) -> Result<Json<CollectionModel<E>>, ApiError>
where
  E: Entity,
  S: DocumentStore + 'static,
{
  let entities = res.service.list().await?;
  Ok(Json(res.links.collection(entities)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /{collection}/{id}`
pub async fn get_one<E, S>(
  State(res): State<Resource<E, S>>,
  Path(id): Path<String>,
) -> Result<Json<EntityModel<E>>, ApiError>
where
  E: Entity,
  S: DocumentStore + 'static,
{
  let entity = res.service.get(&id).await?;
  Ok(Json(res.links.entity(entity)))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /{collection}`. Returns 201, a `Location` header, and the stored
/// entity with its new id.
pub async fn create<E, S>(
  State(res): State<Resource<E, S>>,
  Json(body): Json<E>,
) -> Result<impl IntoResponse, ApiError>
where
  E: Entity + Validate,
  S: DocumentStore + 'static,
{
  body.validate()?;
  let entity = res.service.create(body).await?;
  let location = res.links.item_href(entity.id());
  tracing::info!(collection = res.service.collection(), id = entity.id(), "created");
  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, location)],
    Json(res.links.entity(entity)),
  ))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /{collection}/{id}`. The body replaces the stored document whole.
pub async fn update<E, S>(
  State(res): State<Resource<E, S>>,
  Path(id): Path<String>,
  Json(body): Json<E>,
) -> Result<Json<EntityModel<E>>, ApiError>
where
  E: Entity + Validate,
  S: DocumentStore + 'static,
{
  body.validate()?;
  let entity = res.service.update(&id, body).await?;
  Ok(Json(res.links.entity(entity)))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /{collection}/{id}`
pub async fn delete_one<E, S>(
  State(res): State<Resource<E, S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  E: Entity,
  S: DocumentStore + 'static,
{
  res.service.delete(&id).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /{collection}`
pub async fn delete_all<E, S>(
  State(res): State<Resource<E, S>>,
) -> Result<StatusCode, ApiError>
where
  E: Entity,
  S: DocumentStore + 'static,
{
  let count = res.service.delete_all().await?;
  tracing::info!(collection = res.service.collection(), count, "emptied collection");
  Ok(StatusCode::NO_CONTENT)
}
