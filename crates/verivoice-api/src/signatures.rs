//! Handlers for `/petitions/:id/signatures` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/petitions/:id/signatures` | Body: [`SelfDeclaration`]; returns 201 + signer |
//! | `GET`  | `/petitions/:id/signatures/check` | `?name=`; returns `{"signed": bool}` |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use verivoice_core::{declaration::SelfDeclaration, store::PetitionStore};

use crate::{AppState, error::ApiError};

// ─── Sign ─────────────────────────────────────────────────────────────────────

/// `POST /petitions/:id/signatures`
///
/// The petition must exist and be active, and the declaration must confirm
/// its nationality. A name that has already signed is refused with 409; that
/// check is advisory and racy.
pub async fn sign<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(declaration): Json<SelfDeclaration>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PetitionStore + 'static,
{
  let petition = state
    .petitions
    .get_by_id(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("petition {id} not found")))?;

  if !petition.status.accepts_signatures() {
    return Err(ApiError::BadRequest(format!(
      "petition is {} and no longer accepts signatures",
      petition.status
    )));
  }
  if !declaration.confirms(&petition.nationality) {
    return Err(ApiError::BadRequest(format!(
      "this petition is open to {} nationals only",
      petition.nationality
    )));
  }
  if state.signatures.has_signed(id, &declaration.full_name).await {
    return Err(ApiError::Conflict(format!(
      "{} has already signed this petition",
      declaration.full_name
    )));
  }

  let signer = state
    .signatures
    .sign(id, declaration.full_name, declaration.nationality)
    .await?;
  Ok((StatusCode::CREATED, Json(signer)))
}

// ─── Check ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CheckParams {
  pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResponse {
  pub signed: bool,
}

/// `GET /petitions/:id/signatures/check?name=<name>` — never fails on store
/// errors; reports `false` instead.
pub async fn check<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<CheckParams>,
) -> Json<CheckResponse>
where
  S: PetitionStore + 'static,
{
  let signed = state.signatures.has_signed(id, &params.name).await;
  Json(CheckResponse { signed })
}
