//! PostgREST backend for the VeriVoice petition store.
//!
//! Talks to the hosted database over HTTP using the PostgREST query dialect
//! (`?column=eq.value`, `order=column.desc`). The expected schema, including
//! the trigger that maintains `petitions.signatures`, ships as `schema.sql`.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{RestConfig, RestStore};
