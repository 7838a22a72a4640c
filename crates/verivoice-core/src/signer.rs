//! Signer records.
//!
//! Signers are append-only: one row per sign action, never edited or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, petition::require};

/// One person's declared support for a petition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
  pub id:          Uuid,
  pub petition_id: Uuid,
  pub name:        String,
  pub nationality: String,
  pub signed_at:   DateTime<Utc>,
  /// Always `true` for rows written by this workspace. Reflects a
  /// self-declaration, not an identity check.
  pub verified:    bool,
}

/// Input for recording a signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSigner {
  pub petition_id: Uuid,
  pub name:        String,
  pub nationality: String,
}

impl NewSigner {
  pub fn new(
    petition_id: Uuid,
    name: impl Into<String>,
    nationality: impl Into<String>,
  ) -> Self {
    Self { petition_id, name: name.into(), nationality: nationality.into() }
  }

  pub fn validate(&self) -> Result<()> {
    require("name", &self.name)?;
    require("nationality", &self.nationality)
  }
}
