//! Domain records: the shared [`Person`] field-set and the two persisted
//! entities built on it.
//!
//! Person fields are flattened into each entity on the wire and in the store,
//! so a stored lawyer is a single flat JSON object.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::entity::Entity;

// ─── Person ──────────────────────────────────────────────────────────────────

/// Personal data shared by lawyers and clients. Never persisted on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  /// National identifier (RUT).
  #[validate(length(min = 12, max = 20, message = "must be 12 to 20 characters"))]
  pub rut:              String,
  #[validate(length(min = 2, max = 50, message = "must be 2 to 50 characters"))]
  pub first_name:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  #[validate(length(min = 2, max = 50, message = "must be 2 to 50 characters"))]
  pub middle_name:      Option<String>,
  #[validate(length(min = 2, max = 50, message = "must be 2 to 50 characters"))]
  pub last_name:        String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  #[validate(length(min = 2, max = 50, message = "must be 2 to 50 characters"))]
  pub second_last_name: Option<String>,
  /// Identifier of the supporting document on file.
  #[validate(length(min = 2, max = 50, message = "must be 2 to 50 characters"))]
  pub document:         String,
}

impl Person {
  /// Display name built from the given and family names that are present.
  pub fn full_name(&self) -> String {
    [
      Some(self.first_name.as_str()),
      self.middle_name.as_deref(),
      Some(self.last_name.as_str()),
      self.second_last_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
  }
}

// ─── Lawyer ──────────────────────────────────────────────────────────────────

/// A lawyer ("abogado").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Lawyer {
  /// Store-assigned key; empty until the lawyer is first persisted.
  #[serde(default, deserialize_with = "null_as_empty")]
  pub id:                  String,
  #[serde(flatten)]
  #[validate(nested)]
  pub person:              Person,
  /// Area of practice, e.g. "Derecho Penal".
  #[validate(length(min = 2, max = 100, message = "must be 2 to 100 characters"))]
  pub specialty:           String,
  #[validate(length(min = 2, max = 100, message = "must be 2 to 100 characters"))]
  pub university:          String,
  /// Professional license code.
  #[validate(length(min = 2, max = 50, message = "must be 2 to 50 characters"))]
  pub license:             String,
  #[serde(default)]
  pub years_of_experience: u32,
}

impl Entity for Lawyer {
  const COLLECTION: &'static str = "abogados";
  const KIND: &'static str = "lawyer";

  fn id(&self) -> &str { &self.id }

  fn set_id(&mut self, id: String) { self.id = id; }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// A client ("cliente").
///
/// Phone and email are only checked for presence; their format is not
/// validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Client {
  /// Store-assigned key; empty until the client is first persisted.
  #[serde(default, deserialize_with = "null_as_empty")]
  pub id:      String,
  #[serde(flatten)]
  #[validate(nested)]
  pub person:  Person,
  /// Residential address.
  #[validate(length(min = 2, max = 200, message = "must be 2 to 200 characters"))]
  pub address: String,
  #[validate(length(min = 1, message = "must not be empty"))]
  pub phone:   String,
  #[validate(length(min = 1, message = "must not be empty"))]
  pub email:   String,
}

impl Entity for Client {
  const COLLECTION: &'static str = "clientes";
  const KIND: &'static str = "client";

  fn id(&self) -> &str { &self.id }

  fn set_id(&mut self, id: String) { self.id = id; }
}

/// Read an absent-or-null string as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
  Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn person() -> Person {
    Person {
      rut:              "11.111.111-1".into(),
      first_name:       "Juan".into(),
      middle_name:      Some("Carlos".into()),
      last_name:        "Pérez".into(),
      second_last_name: None,
      document:         "DOC12345".into(),
    }
  }

  #[test]
  fn lawyer_serialises_flat() {
    let lawyer = Lawyer {
      id:                  "abc".into(),
      person:              person(),
      specialty:           "Derecho Civil".into(),
      university:          "Universidad de Chile".into(),
      license:             "LIC1234".into(),
      years_of_experience: 5,
    };

    let value = serde_json::to_value(&lawyer).unwrap();
    assert_eq!(value["id"], "abc");
    assert_eq!(value["firstName"], "Juan");
    assert_eq!(value["yearsOfExperience"], 5);
    assert!(value.get("person").is_none());
    assert!(value.get("secondLastName").is_none());
  }

  #[test]
  fn client_without_id_deserialises_with_empty_id() {
    let client: Client = serde_json::from_value(json!({
      "rut": "22.222.222-2",
      "firstName": "María",
      "lastName": "Rodríguez",
      "document": "DOC67890",
      "address": "Av. Siempre Viva 742",
      "phone": "+56 9 1234 5678",
      "email": "maria@example.com"
    }))
    .unwrap();

    assert!(client.id.is_empty());
    assert_eq!(client.person.first_name, "María");
    assert_eq!(client.person.middle_name, None);
  }

  #[test]
  fn validation_rejects_short_fields() {
    let mut lawyer = Lawyer {
      person: person(),
      specialty: "Derecho Civil".into(),
      university: "Universidad de Chile".into(),
      license: "LIC1234".into(),
      ..Default::default()
    };
    assert!(lawyer.validate().is_ok());

    lawyer.license = "L".into();
    lawyer.person.rut = "short".into();
    let errors = lawyer.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("license"));
    assert!(errors.errors().contains_key("person"));
  }

  #[test]
  fn null_id_deserialises_as_empty() {
    let lawyer: Lawyer = serde_json::from_value(json!({
      "id": null,
      "rut": "11.111.111-1",
      "firstName": "Juan",
      "lastName": "Pérez",
      "document": "DOC12345",
      "specialty": "Derecho Civil",
      "university": "Universidad de Chile",
      "license": "LIC1234",
      "yearsOfExperience": 3
    }))
    .unwrap();

    assert!(lawyer.id.is_empty());
    assert_eq!(lawyer.years_of_experience, 3);
  }

  #[test]
  fn client_validation_checks_address_phone_and_email() {
    let mut client = Client {
      person: person(),
      address: "Av. Siempre Viva 742".into(),
      phone: "+56 9 1234 5678".into(),
      email: "maria@example.com".into(),
      ..Default::default()
    };
    assert!(client.validate().is_ok());

    client.address = "x".into();
    client.phone = String::new();
    client.email = String::new();
    let errors = client.validate().unwrap_err();
    let fields = errors.field_errors();
    assert!(fields.contains_key("address"));
    assert!(fields.contains_key("phone"));
    assert!(fields.contains_key("email"));

    client.address = "a".repeat(201);
    client.phone = "1".into();
    client.email = "e".into();
    let errors = client.validate().unwrap_err();
    assert_eq!(
      errors.field_errors()["address"][0].message.as_deref(),
      Some("must be 2 to 200 characters")
    );
    assert!(!errors.field_errors().contains_key("phone"));

    client.address = "a".repeat(200);
    assert!(client.validate().is_ok());
  }

  #[test]
  fn full_name_skips_missing_parts() {
    assert_eq!(person().full_name(), "Juan Carlos Pérez");
  }
}
