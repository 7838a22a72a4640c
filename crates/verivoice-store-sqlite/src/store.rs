//! [`SqliteStore`] — the SQLite implementation of [`PetitionStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;
use verivoice_core::{
  petition::{NewPetition, PetitionRecord, PetitionStatus},
  signer::{NewSigner, Signer},
  store::PetitionStore,
};

use crate::{
  Result,
  encode::{
    PETITION_COLUMNS, RawPetition, RawSigner, SIGNER_COLUMNS, encode_dt, encode_uuid, now,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A petition store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Administrative status change. Returns `false` if no such petition.
  ///
  /// Not part of [`PetitionStore`]: the repositories never transition a
  /// petition.
  pub async fn set_status(&self, id: Uuid, status: PetitionStatus) -> Result<bool> {
    let id_str = encode_uuid(id);
    let status_str = status.as_ref().to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE petitions SET status = ?1 WHERE id = ?2",
          rusqlite::params![status_str, id_str],
        )?)
      })
      .await?;

    if changed > 0 {
      tracing::info!(petition_id = %id, %status, "petition status changed");
    }
    Ok(changed > 0)
  }
}

// ─── PetitionStore impl ──────────────────────────────────────────────────────

impl PetitionStore for SqliteStore {
  type Error = crate::Error;

  // ── Petitions ─────────────────────────────────────────────────────────────

  async fn insert_petition(&self, input: NewPetition) -> Result<PetitionRecord> {
    let record = PetitionRecord {
      id:           Uuid::new_v4(),
      title:        input.title,
      description:  input.description,
      nationality:  input.nationality,
      creator_name: input.creator_name,
      created_at:   now(),
      signatures:   0,
      status:       PetitionStatus::default(),
    };

    let id_str      = encode_uuid(record.id);
    let title       = record.title.clone();
    let description = record.description.clone();
    let nationality = record.nationality.clone();
    let creator     = record.creator_name.clone();
    let at_str      = encode_dt(record.created_at);
    let status_str  = record.status.as_ref().to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO petitions (
             id, title, description, nationality, creator_name,
             created_at, signatures, status
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
          rusqlite::params![
            id_str,
            title,
            description,
            nationality,
            creator,
            at_str,
            status_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn list_petitions(&self) -> Result<Vec<PetitionRecord>> {
    let raws: Vec<RawPetition> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PETITION_COLUMNS} FROM petitions
           ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map([], RawPetition::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPetition::into_record).collect()
  }

  async fn get_petition(&self, id: Uuid) -> Result<Option<PetitionRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPetition> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PETITION_COLUMNS} FROM petitions WHERE id = ?1"),
              rusqlite::params![id_str],
              RawPetition::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPetition::into_record).transpose()
  }

  // ── Signers ───────────────────────────────────────────────────────────────

  async fn list_signers(&self, petition_id: Uuid) -> Result<Vec<Signer>> {
    let id_str = encode_uuid(petition_id);

    let raws: Vec<RawSigner> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SIGNER_COLUMNS} FROM signers
           WHERE petition_id = ?1
           ORDER BY signed_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawSigner::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSigner::into_signer).collect()
  }

  /// Inserts the signer and bumps `petitions.signatures` in one transaction.
  async fn insert_signer(&self, input: NewSigner) -> Result<Signer> {
    let signer = Signer {
      id:          Uuid::new_v4(),
      petition_id: input.petition_id,
      name:        input.name,
      nationality: input.nationality,
      signed_at:   now(),
      verified:    true,
    };

    let id_str          = encode_uuid(signer.id);
    let petition_id_str = encode_uuid(signer.petition_id);
    let name            = signer.name.clone();
    let nationality     = signer.nationality.clone();
    let at_str          = encode_dt(signer.signed_at);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO signers (id, petition_id, name, nationality, signed_at, verified)
           VALUES (?1, ?2, ?3, ?4, ?5, 1)",
          rusqlite::params![id_str, petition_id_str, name, nationality, at_str],
        )?;
        tx.execute(
          "UPDATE petitions SET signatures = signatures + 1 WHERE id = ?1",
          rusqlite::params![petition_id_str],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(signer)
  }

  async fn signer_exists(&self, petition_id: Uuid, name: &str) -> Result<bool> {
    let id_str = encode_uuid(petition_id);
    let name = name.to_owned();

    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM signers WHERE petition_id = ?1 AND name = ?2 LIMIT 1",
              rusqlite::params![id_str, name],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(found)
  }
}
