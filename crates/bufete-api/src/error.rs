//! API error type and [`axum::response::IntoResponse`] implementation.

use std::collections::BTreeMap;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("invalid request body")]
  Validation(#[from] ValidationErrors),

  #[error("store unavailable: {0}")]
  Unavailable(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<bufete_core::Error> for ApiError {
  fn from(e: bufete_core::Error) -> Self {
    match e {
      bufete_core::Error::NotFound { .. } => ApiError::NotFound(e.to_string()),
      bufete_core::Error::Interrupted => ApiError::Unavailable(e.to_string()),
      other => ApiError::Store(Box::new(other)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::Validation(errors) => (
        StatusCode::BAD_REQUEST,
        json!({ "error": self.to_string(), "fields": field_errors(errors) }),
      ),
      ApiError::Unavailable(m) => {
        (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": m }))
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
      }
    };
    (status, Json(body)).into_response()
  }
}

/// Flatten validation errors into `field -> [messages]`.
///
/// Nested structs are flattened into their parent, matching the flat JSON
/// shape of entities on the wire. Keys are the camelCase names clients send.
fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
  let mut out = BTreeMap::new();
  collect(errors, &mut out);
  out
}

fn collect(errors: &ValidationErrors, out: &mut BTreeMap<String, Vec<String>>) {
  for (field, kind) in errors.errors() {
    match kind {
      ValidationErrorsKind::Field(issues) => {
        out
          .entry(wire_name(field))
          .or_default()
          .extend(issues.iter().map(describe));
      }
      ValidationErrorsKind::Struct(inner) => collect(inner, out),
      ValidationErrorsKind::List(items) => {
        for inner in items.values() {
          collect(inner, out);
        }
      }
    }
  }
}

/// `years_of_experience` -> `yearsOfExperience`.
fn wire_name(field: &str) -> String {
  let mut out = String::with_capacity(field.len());
  let mut upper = false;
  for c in field.chars() {
    if c == '_' {
      upper = true;
    } else if upper {
      out.extend(c.to_uppercase());
      upper = false;
    } else {
      out.push(c);
    }
  }
  out
}

/// The attribute's message when one is set, else the validator code.
fn describe(issue: &ValidationError) -> String {
  match &issue.message {
    Some(message) => message.to_string(),
    None => issue.code.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wire_name_is_camel_case() {
    assert_eq!(wire_name("first_name"), "firstName");
    assert_eq!(wire_name("second_last_name"), "secondLastName");
    assert_eq!(wire_name("rut"), "rut");
  }

  #[test]
  fn describe_prefers_message_over_code() {
    let mut issue = ValidationError::new("length");
    assert_eq!(describe(&issue), "length");

    issue.message = Some("too short".into());
    assert_eq!(describe(&issue), "too short");
  }
}
