//! Encoding and decoding helpers between store types and the plain-text
//! representations kept in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; bodies as compact JSON. The
//! `written_at` column is only ever written.

use bufete_core::Document;
use chrono::{DateTime, Utc};

use crate::Result;

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

// ─── Body ────────────────────────────────────────────────────────────────────

pub fn encode_body(data: &serde_json::Value) -> Result<String> {
  Ok(serde_json::to_string(data)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `documents` row.
pub struct RawDocument {
  pub doc_id: String,
  pub body:   String,
}

impl RawDocument {
  pub fn into_document(self) -> Result<Document> {
    Ok(Document {
      id:   self.doc_id,
      data: serde_json::from_str(&self.body)?,
    })
  }
}
