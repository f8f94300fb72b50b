//! [`SqliteStore`]: the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use bufete_core::{
  Document, DocumentStore,
  store::generate_id,
};
use chrono::Utc;
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawDocument, encode_body, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A document store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Close the underlying connection. Later calls fail with
  /// [`bufete_core::Error::Interrupted`] once converted.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = Error;

  fn new_id(&self) -> String { generate_id() }

  async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
    let collection = collection.to_owned();
    let id = id.to_owned();

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT doc_id, body FROM documents
               WHERE collection = ?1 AND doc_id = ?2",
              rusqlite::params![collection, id],
              |row| {
                Ok(RawDocument {
                  doc_id: row.get(0)?,
                  body:   row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDocument::into_document).transpose()
  }

  async fn set(
    &self,
    collection: &str,
    id: &str,
    data: serde_json::Value,
  ) -> Result<()> {
    let collection = collection.to_owned();
    let id         = id.to_owned();
    let body       = encode_body(&data)?;
    let at         = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (collection, doc_id, body, written_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (collection, doc_id)
           DO UPDATE SET body = excluded.body, written_at = excluded.written_at",
          rusqlite::params![collection, id, body, at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete(&self, collection: &str, id: &str) -> Result<()> {
    let collection = collection.to_owned();
    let id = id.to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM documents WHERE collection = ?1 AND doc_id = ?2",
          rusqlite::params![collection, id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list(&self, collection: &str) -> Result<Vec<Document>> {
    let collection = collection.to_owned();

    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT doc_id, body FROM documents
           WHERE collection = ?1
           ORDER BY doc_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![collection], |row| {
            Ok(RawDocument {
              doc_id: row.get(0)?,
              body:   row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocument::into_document).collect()
  }
}
