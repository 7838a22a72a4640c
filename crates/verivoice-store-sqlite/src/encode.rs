//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings with a fixed microsecond width so that
//! lexical order matches chronological order. UUIDs are hyphenated lowercase.

use std::str::FromStr as _;

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use uuid::Uuid;
use verivoice_core::{
  petition::{PetitionRecord, PetitionStatus},
  signer::Signer,
};

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time truncated to what a column can hold.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── PetitionStatus ──────────────────────────────────────────────────────────

pub fn decode_status(s: &str) -> Result<PetitionStatus> {
  PetitionStatus::from_str(s).map_err(|_| Error::UnknownStatus(s.to_owned()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const PETITION_COLUMNS: &str =
  "id, title, description, nationality, creator_name, created_at, signatures, status";

pub const SIGNER_COLUMNS: &str =
  "id, petition_id, name, nationality, signed_at, verified";

/// Raw values read directly from a `petitions` row.
pub struct RawPetition {
  pub id:           String,
  pub title:        String,
  pub description:  String,
  pub nationality:  String,
  pub creator_name: String,
  pub created_at:   String,
  pub signatures:   i64,
  pub status:       String,
}

impl RawPetition {
  /// Map a row selected with [`PETITION_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      title:        row.get(1)?,
      description:  row.get(2)?,
      nationality:  row.get(3)?,
      creator_name: row.get(4)?,
      created_at:   row.get(5)?,
      signatures:   row.get(6)?,
      status:       row.get(7)?,
    })
  }

  pub fn into_record(self) -> Result<PetitionRecord> {
    Ok(PetitionRecord {
      id:           decode_uuid(&self.id)?,
      title:        self.title,
      description:  self.description,
      nationality:  self.nationality,
      creator_name: self.creator_name,
      created_at:   decode_dt(&self.created_at)?,
      signatures:   self.signatures,
      status:       decode_status(&self.status)?,
    })
  }
}

/// Raw values read directly from a `signers` row.
pub struct RawSigner {
  pub id:          String,
  pub petition_id: String,
  pub name:        String,
  pub nationality: String,
  pub signed_at:   String,
  pub verified:    bool,
}

impl RawSigner {
  /// Map a row selected with [`SIGNER_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      petition_id: row.get(1)?,
      name:        row.get(2)?,
      nationality: row.get(3)?,
      signed_at:   row.get(4)?,
      verified:    row.get(5)?,
    })
  }

  pub fn into_signer(self) -> Result<Signer> {
    Ok(Signer {
      id:          decode_uuid(&self.id)?,
      petition_id: decode_uuid(&self.petition_id)?,
      name:        self.name,
      nationality: self.nationality,
      signed_at:   decode_dt(&self.signed_at)?,
      verified:    self.verified,
    })
  }
}
