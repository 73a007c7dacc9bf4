//! Core logic of the todo service.
//!
//! # Overview
//! Validates client payloads, builds list filters, and drives a pluggable
//! record store. Nothing here knows about HTTP; the server crate maps
//! `TodoError` onto status codes and JSON bodies.
//!
//! # Design
//! - `TodoService` holds an `Arc<dyn TodoStore>` so persistence is injected,
//!   with `MemoryStore` as the bundled backend.
//! - Payloads stay raw JSON objects until `payload` checks their key set
//!   against `ALLOWED_FIELDS` / `REQUIRED_FIELDS`.
//! - Timestamps are naive (no timezone) and serialize as ISO-8601.

pub mod error;
pub mod filter;
pub mod payload;
pub mod service;
pub mod store;
pub mod timestamp;
pub mod types;

pub use error::TodoError;
pub use filter::TodoFilter;
pub use payload::{Payload, ALLOWED_FIELDS, REQUIRED_FIELDS};
pub use service::{Health, TodoService};
pub use store::{MemoryStore, TodoStore};
pub use types::{NewTodo, Todo, TodoChanges, TodoId};
