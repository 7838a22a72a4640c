//! Petition records and the composed read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, signer::Signer};

/// Lifecycle status of a petition. Nothing in this workspace transitions it;
/// it is set by whoever administers the backing store.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::AsRefStr,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PetitionStatus {
  #[default]
  Active,
  UnderReview,
  Closed,
}

impl PetitionStatus {
  /// Only active petitions accept new signatures.
  pub fn accepts_signatures(self) -> bool { matches!(self, Self::Active) }
}

/// Input for creating a petition. `id`, `created_at`, `status` and the
/// signature counter are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPetition {
  pub title:        String,
  pub description:  String,
  pub nationality:  String,
  pub creator_name: String,
}

impl NewPetition {
  pub fn new(
    title: impl Into<String>,
    description: impl Into<String>,
    nationality: impl Into<String>,
    creator_name: impl Into<String>,
  ) -> Self {
    Self {
      title:        title.into(),
      description:  description.into(),
      nationality:  nationality.into(),
      creator_name: creator_name.into(),
    }
  }

  /// Reject blank fields. Nationality membership is not checked here.
  pub fn validate(&self) -> Result<()> {
    require("title", &self.title)?;
    require("description", &self.description)?;
    require("nationality", &self.nationality)?;
    require("creator_name", &self.creator_name)
  }
}

pub(crate) fn require(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::InvalidInput(format!("{field} must not be empty")));
  }
  Ok(())
}

/// A `petitions` row as returned by the store, without its signers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetitionRecord {
  pub id:           Uuid,
  pub title:        String,
  pub description:  String,
  pub nationality:  String,
  pub creator_name: String,
  pub created_at:   DateTime<Utc>,
  pub signatures:   i64,
  pub status:       PetitionStatus,
}

impl PetitionRecord {
  /// Attach signers, producing the read model handed to the page layer.
  pub fn with_signers(self, signers: Vec<Signer>) -> Petition {
    Petition {
      id: self.id,
      title: self.title,
      description: self.description,
      nationality: self.nationality,
      creator_name: self.creator_name,
      created_at: self.created_at,
      signatures: self.signatures,
      status: self.status,
      signers,
    }
  }
}

/// A petition together with its signers, newest first. Never stored as such;
/// always composed at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Petition {
  pub id:           Uuid,
  pub title:        String,
  pub description:  String,
  pub nationality:  String,
  pub creator_name: String,
  pub created_at:   DateTime<Utc>,
  pub signatures:   i64,
  pub status:       PetitionStatus,
  pub signers:      Vec<Signer>,
}
