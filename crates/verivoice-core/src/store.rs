//! The `PetitionStore` trait: the thin client onto the external store.
//!
//! Implemented by storage backends (`verivoice-store-sqlite`,
//! `verivoice-store-rest`). Each method is a single request/response; none
//! spans multiple uncommitted steps. Propagation policy lives one layer up in
//! [`crate::repository`].

use std::future::Future;

use uuid::Uuid;

use crate::{
  petition::{NewPetition, PetitionRecord},
  signer::{NewSigner, Signer},
};

/// Abstraction over the relational store holding `petitions` and `signers`.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PetitionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Petitions ─────────────────────────────────────────────────────────

  /// Insert a petition and return the persisted row. The store assigns
  /// `id`, `created_at`, `status = active` and `signatures = 0`.
  fn insert_petition(
    &self,
    input: NewPetition,
  ) -> impl Future<Output = Result<PetitionRecord, Self::Error>> + Send + '_;

  /// All petitions, newest `created_at` first.
  fn list_petitions(
    &self,
  ) -> impl Future<Output = Result<Vec<PetitionRecord>, Self::Error>> + Send + '_;

  /// A single petition. `Ok(None)` when the store reports no row.
  fn get_petition(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<PetitionRecord>, Self::Error>> + Send + '_;

  // ── Signers ───────────────────────────────────────────────────────────

  /// Signers of one petition, newest `signed_at` first.
  fn list_signers(
    &self,
    petition_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Signer>, Self::Error>> + Send + '_;

  /// Append a signer row with `verified = true`.
  fn insert_signer(
    &self,
    input: NewSigner,
  ) -> impl Future<Output = Result<Signer, Self::Error>> + Send + '_;

  /// Whether any signer of `petition_id` has exactly this `name`.
  fn signer_exists<'a>(
    &'a self,
    petition_id: Uuid,
    name: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
