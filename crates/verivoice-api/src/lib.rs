//! JSON REST API for VeriVoice.
//!
//! Exposes an axum [`Router`] backed by any [`PetitionStore`]. This is the
//! surface the page layer calls; rendering, TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", verivoice_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod nationalities;
pub mod petitions;
pub mod signatures;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use verivoice_core::{
  repository::{PetitionRepository, SignatureRepository},
  store::PetitionStore,
};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub petitions:  PetitionRepository<S>,
  pub signatures: SignatureRepository<S>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      petitions:  self.petitions.clone(),
      signatures: self.signatures.clone(),
    }
  }
}

impl<S: PetitionStore> AppState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      petitions:  PetitionRepository::new(Arc::clone(&store)),
      signatures: SignatureRepository::new(store),
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PetitionStore + 'static,
{
  Router::new()
    .route("/nationalities", get(nationalities::list))
    // Petitions
    .route("/petitions", get(petitions::list::<S>).post(petitions::create::<S>))
    .route("/petitions/{id}", get(petitions::get_one::<S>))
    // Signatures
    .route("/petitions/{id}/signatures", post(signatures::sign::<S>))
    .route("/petitions/{id}/signatures/check", get(signatures::check::<S>))
    .with_state(AppState::new(store))
}

#[cfg(test)]
mod tests;
