//! Data written at startup so a fresh deployment has something to show.
//!
//! Two sources: the fixed [`sample_lawyers`], seeded once into an empty
//! collection, and randomly generated records from [`fake_lawyers`] and
//! [`fake_clients`], added on every start when asked for.

use rand::Rng;

use crate::{
  Result,
  model::{Client, Lawyer, Person},
  service::{ClientService, LawyerService},
  store::DocumentStore,
};

// ─── Fixed samples ───────────────────────────────────────────────────────────

/// The three lawyers inserted into an empty collection.
pub fn sample_lawyers() -> Vec<Lawyer> {
  [
    (
      "Derecho Civil",
      "Universidad de Chile",
      "LIC1234",
      5,
      ["11.111.111-1", "Juan", "Carlos", "Pérez", "Gómez", "DOC12345"],
    ),
    (
      "Derecho Penal",
      "Universidad Católica",
      "LIC5678",
      8,
      ["22.222.222-2", "María", "Isabel", "Rodríguez", "Soto", "DOC67890"],
    ),
    (
      "Derecho Laboral",
      "Universidad de Santiago",
      "LIC91011",
      10,
      ["33.333.333-3", "Luis", "Alberto", "González", "Fuentes", "DOC11121"],
    ),
  ]
  .into_iter()
  .map(|(specialty, university, license, years, [rut, first, middle, last, second_last, document])| {
    Lawyer {
      id:                  String::new(),
      person:              Person {
        rut:              rut.into(),
        first_name:       first.into(),
        middle_name:      Some(middle.into()),
        last_name:        last.into(),
        second_last_name: Some(second_last.into()),
        document:         document.into(),
      },
      specialty:           specialty.into(),
      university:          university.into(),
      license:             license.into(),
      years_of_experience: years,
    }
  })
  .collect()
}

/// Insert [`sample_lawyers`] if the lawyer collection is empty.
///
/// Returns the number of lawyers created (zero when data already exists).
pub async fn seed_lawyers<S: DocumentStore>(
  service: &LawyerService<S>,
) -> Result<usize> {
  if !service.is_empty().await? {
    tracing::debug!(collection = service.collection(), "not empty; skipping seed");
    return Ok(0);
  }

  let samples = sample_lawyers();
  let count = samples.len();
  for lawyer in samples {
    let lawyer = service.create(lawyer).await?;
    tracing::debug!(id = %lawyer.id, name = %lawyer.person.full_name(), "seeded lawyer");
  }
  tracing::info!(collection = service.collection(), count, "seeded sample lawyers");
  Ok(count)
}

// ─── Generated records ───────────────────────────────────────────────────────

const FIRST_NAMES: &[&str] = &[
  "Camila", "Sebastián", "Valentina", "Matías", "Francisca", "Benjamín",
  "Josefa", "Tomás", "Antonia", "Vicente", "Catalina", "Joaquín",
];

const LAST_NAMES: &[&str] = &[
  "Muñoz", "Rojas", "Díaz", "Contreras", "Silva", "Martínez", "Sepúlveda",
  "Morales", "Araya", "Fuentes", "Castillo", "Espinoza",
];

const STREETS: &[&str] = &[
  "Av. Providencia", "Av. Apoquindo", "Calle Huérfanos", "Av. Matta",
  "Calle Arturo Prat", "Av. Grecia",
];

const CITIES: &[&str] =
  &["Santiago", "Valparaíso", "Concepción", "La Serena", "Temuco", "Antofagasta"];

const SPECIALTIES: &[&str] = &[
  "Derecho Civil", "Derecho Penal", "Derecho Laboral", "Derecho de Familia",
  "Derecho Tributario", "Derecho Comercial",
];

const UNIVERSITIES: &[&str] = &[
  "Universidad de Chile", "Pontificia Universidad Católica",
  "Universidad de Concepción", "Universidad Diego Portales",
  "Universidad de Valparaíso",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
  pool[rng.gen_range(0..pool.len())]
}

/// A RUT with a correct check digit, formatted `12.345.678-5`.
pub fn fake_rut<R: Rng + ?Sized>(rng: &mut R) -> String {
  let body: u32 = rng.gen_range(10_000_000..=25_999_999);
  format!(
    "{}.{:03}.{:03}-{}",
    body / 1_000_000,
    body / 1_000 % 1_000,
    body % 1_000,
    rut_check_digit(body),
  )
}

/// Modulo-11 check digit of a RUT body.
fn rut_check_digit(mut body: u32) -> char {
  let mut sum = 0;
  let mut factor = 2;
  while body > 0 {
    sum += body % 10 * factor;
    body /= 10;
    factor = if factor == 7 { 2 } else { factor + 1 };
  }
  match 11 - sum % 11 {
    11 => '0',
    10 => 'K',
    d => char::from_digit(d, 10).unwrap_or('0'),
  }
}

/// Lowercase ASCII rendering of a name, for email local parts.
fn ascii_slug(name: &str) -> String {
  name
    .chars()
    .map(|c| match c {
      'á' | 'Á' => 'a',
      'é' | 'É' => 'e',
      'í' | 'Í' => 'i',
      'ó' | 'Ó' => 'o',
      'ú' | 'Ú' => 'u',
      'ñ' | 'Ñ' => 'n',
      c => c.to_ascii_lowercase(),
    })
    .filter(char::is_ascii_alphanumeric)
    .collect()
}

fn fake_person<R: Rng + ?Sized>(rng: &mut R) -> Person {
  Person {
    rut:              fake_rut(rng),
    first_name:       pick(rng, FIRST_NAMES).into(),
    middle_name:      Some(pick(rng, FIRST_NAMES).into()),
    last_name:        pick(rng, LAST_NAMES).into(),
    second_last_name: Some(pick(rng, LAST_NAMES).into()),
    document:         format!("DOC{:06}", rng.gen_range(0..1_000_000)),
  }
}

/// `count` randomly generated lawyers, without ids.
pub fn fake_lawyers<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Lawyer> {
  (0..count)
    .map(|_| Lawyer {
      id:                  String::new(),
      person:              fake_person(rng),
      specialty:           pick(rng, SPECIALTIES).into(),
      university:          pick(rng, UNIVERSITIES).into(),
      license:             format!("LIC{:05}", rng.gen_range(0..100_000)),
      years_of_experience: rng.gen_range(1..40),
    })
    .collect()
}

/// `count` randomly generated clients, without ids.
pub fn fake_clients<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Client> {
  (0..count)
    .map(|_| {
      let person = fake_person(rng);
      let email = format!(
        "{}.{}{}@example.com",
        ascii_slug(&person.first_name),
        ascii_slug(&person.last_name),
        rng.gen_range(1..100),
      );
      Client {
        id: String::new(),
        person,
        address: format!(
          "{} {}, {}",
          pick(rng, STREETS),
          rng.gen_range(1..10_000),
          pick(rng, CITIES),
        ),
        phone: format!(
          "+56 9 {:04} {:04}",
          rng.gen_range(0..10_000),
          rng.gen_range(0..10_000),
        ),
        email,
      }
    })
    .collect()
}

/// Create `count` generated lawyers and `count` generated clients.
///
/// Unlike [`seed_lawyers`] this runs regardless of existing data. Returns
/// the total number of records created.
pub async fn seed_fake_records<S: DocumentStore>(
  lawyers: &LawyerService<S>,
  clients: &ClientService<S>,
  count: usize,
) -> Result<usize> {
  let (new_lawyers, new_clients) = {
    let mut rng = rand::thread_rng();
    (fake_lawyers(count, &mut rng), fake_clients(count, &mut rng))
  };

  for lawyer in new_lawyers {
    let lawyer = lawyers.create(lawyer).await?;
    tracing::debug!(id = %lawyer.id, name = %lawyer.person.full_name(), "generated lawyer");
  }
  for client in new_clients {
    let client = clients.create(client).await?;
    tracing::debug!(id = %client.id, name = %client.person.full_name(), "generated client");
  }
  tracing::info!(count, "generated fake lawyers and clients");
  Ok(count * 2)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use rand::{SeedableRng as _, rngs::StdRng};
  use validator::Validate as _;

  use super::*;
  use crate::MemoryStore;

  #[test]
  fn samples_pass_validation() {
    for lawyer in sample_lawyers() {
      lawyer.validate().unwrap();
    }
  }

  #[tokio::test]
  async fn seeds_empty_collection_once() {
    let service = LawyerService::new(Arc::new(MemoryStore::new()));

    assert_eq!(seed_lawyers(&service).await.unwrap(), 3);
    assert_eq!(seed_lawyers(&service).await.unwrap(), 0);

    let mut specialties: Vec<_> =
      service.list().await.unwrap().into_iter().map(|l| l.specialty).collect();
    specialties.sort();
    assert_eq!(specialties, ["Derecho Civil", "Derecho Laboral", "Derecho Penal"]);
  }

  #[test]
  fn rut_check_digit_matches_known_ruts() {
    assert_eq!(rut_check_digit(11_111_111), '1');
    assert_eq!(rut_check_digit(12_345_678), '5');
  }

  #[test]
  fn generated_records_pass_validation() {
    let mut rng = StdRng::seed_from_u64(7);
    for lawyer in fake_lawyers(50, &mut rng) {
      lawyer.validate().unwrap();
      assert!((1..40).contains(&lawyer.years_of_experience));
    }
    for client in fake_clients(50, &mut rng) {
      client.validate().unwrap();
      assert!(client.email.is_ascii(), "{}", client.email);
    }
  }

  #[test]
  fn ascii_slug_folds_accents() {
    assert_eq!(ascii_slug("Sebastián"), "sebastian");
    assert_eq!(ascii_slug("Muñoz"), "munoz");
  }

  #[tokio::test]
  async fn fake_records_are_added_on_every_call() {
    let store = Arc::new(MemoryStore::new());
    let lawyers = LawyerService::new(Arc::clone(&store));
    let clients = ClientService::new(store);

    assert_eq!(seed_fake_records(&lawyers, &clients, 5).await.unwrap(), 10);
    assert_eq!(seed_fake_records(&lawyers, &clients, 5).await.unwrap(), 10);

    assert_eq!(lawyers.list().await.unwrap().len(), 10);
    assert_eq!(clients.list().await.unwrap().len(), 10);
  }
}
