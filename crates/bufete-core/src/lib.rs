//! Core types and trait definitions for the bufete lawyer/client service.
//!
//! This crate is deliberately free of HTTP and SQL dependencies. Storage
//! backends implement [`store::DocumentStore`]; the HTTP layer drives
//! [`service::EntityService`].

pub mod entity;
pub mod error;
pub mod memory;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use entity::Entity;
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use model::{Client, Lawyer, Person};
pub use service::EntityService;
pub use store::{Document, DocumentStore};
