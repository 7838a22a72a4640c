//! Petition and signature repositories.
//!
//! Both wrap an injected [`PetitionStore`] and turn its backend-specific
//! errors into [`Error::Persistence`]. Read policy: collection reads tolerate
//! a failure fetching derived data (signers, duplicate checks) and degrade to
//! an empty result; single-entity reads do not.

use std::sync::Arc;

use futures::future::join_all;
use uuid::Uuid;

use crate::{
  Error, Result,
  petition::{NewPetition, Petition},
  signer::{NewSigner, Signer},
  store::PetitionStore,
};

// ─── Petitions ───────────────────────────────────────────────────────────────

/// Create, list and fetch petitions with their signers attached.
pub struct PetitionRepository<S> {
  store: Arc<S>,
}

impl<S> Clone for PetitionRepository<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: PetitionStore> PetitionRepository<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate and insert a petition. The returned petition has no signers.
  pub async fn create(&self, input: NewPetition) -> Result<Petition> {
    input.validate()?;

    let record = self
      .store
      .insert_petition(input)
      .await
      .map_err(Error::persistence)?;

    tracing::debug!(petition_id = %record.id, "created petition");
    Ok(record.with_signers(Vec::new()))
  }

  /// Every petition, newest first, each with its signers newest first.
  ///
  /// Signers are fetched concurrently, one request per petition. If one of
  /// those requests fails the petition is still returned, with no signers.
  pub async fn list_all(&self) -> Result<Vec<Petition>> {
    let records = self
      .store
      .list_petitions()
      .await
      .map_err(Error::persistence)?;

    let composed = records.into_iter().map(|record| async move {
      match self.store.list_signers(record.id).await {
        Ok(signers) => record.with_signers(signers),
        Err(e) => {
          tracing::warn!(
            petition_id = %record.id,
            error = %e,
            "failed to fetch signers; returning petition without them"
          );
          record.with_signers(Vec::new())
        }
      }
    });

    Ok(join_all(composed).await)
  }

  /// A single petition with its signers, or `Ok(None)` if no such row.
  /// Failing to fetch the signers fails the whole call.
  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Petition>> {
    let Some(record) = self
      .store
      .get_petition(id)
      .await
      .map_err(Error::persistence)?
    else {
      return Ok(None);
    };

    let signers = self
      .store
      .list_signers(id)
      .await
      .map_err(Error::persistence)?;

    Ok(Some(record.with_signers(signers)))
  }
}

// ─── Signatures ──────────────────────────────────────────────────────────────

/// Record signatures and answer the advisory "already signed?" question.
///
/// Nothing couples [`has_signed`](Self::has_signed) to
/// [`sign`](Self::sign): two concurrent signers with the same name can both
/// pass the check and both be recorded.
pub struct SignatureRepository<S> {
  store: Arc<S>,
}

impl<S> Clone for SignatureRepository<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: PetitionStore> SignatureRepository<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Append a signer with `verified = true`.
  pub async fn sign(
    &self,
    petition_id: Uuid,
    name: impl Into<String>,
    nationality: impl Into<String>,
  ) -> Result<Signer> {
    let input = NewSigner::new(petition_id, name, nationality);
    input.validate()?;

    let signer = self
      .store
      .insert_signer(input)
      .await
      .map_err(Error::persistence)?;

    tracing::debug!(%petition_id, signer_id = %signer.id, "recorded signature");
    Ok(signer)
  }

  /// Exact, case-sensitive name match against the petition's signers.
  /// Fails open: a store error is logged and reported as `false`.
  pub async fn has_signed(&self, petition_id: Uuid, name: &str) -> bool {
    match self.store.signer_exists(petition_id, name).await {
      Ok(found) => found,
      Err(e) => {
        tracing::warn!(%petition_id, error = %e, "duplicate-signer check failed");
        false
      }
    }
  }
}
