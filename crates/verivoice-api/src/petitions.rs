//! Handlers for `/petitions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/petitions` | Optional `?status=active\|under_review\|closed\|all` and `?q=text` |
//! | `POST` | `/petitions` | Body: [`CreateBody`]; returns 201 + petition |
//! | `GET`  | `/petitions/:id` | Petition with signers; 404 if not found |

use std::str::FromStr as _;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use verivoice_core::{
  declaration::SelfDeclaration,
  filter::PetitionFilter,
  nationality,
  petition::{NewPetition, Petition, PetitionStatus},
  store::PetitionStore,
};

use crate::{AppState, error::ApiError};

/// Creator recorded when the form supplies none. There are no accounts.
pub const ANONYMOUS_CREATOR: &str = "Anonymous User";

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// A status, or `all` / absent for every status.
  pub status: Option<String>,
  /// Free text matched against title, description and nationality.
  pub q:      Option<String>,
}

impl ListParams {
  fn into_filter(self) -> Result<PetitionFilter, ApiError> {
    let status = match self.status.as_deref().map(str::trim) {
      None | Some("") | Some("all") => None,
      Some(s) => Some(
        PetitionStatus::from_str(s)
          .map_err(|_| ApiError::BadRequest(format!("unknown status {s:?}")))?,
      ),
    };
    Ok(PetitionFilter { status, text: self.q })
  }
}

/// `GET /petitions[?status=<status>][&q=<text>]` — newest first.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Petition>>, ApiError>
where
  S: PetitionStore + 'static,
{
  let filter = params.into_filter()?;
  let petitions = state.petitions.list_all().await?;
  Ok(Json(filter.apply(petitions)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /petitions`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:        String,
  pub description:  String,
  pub nationality:  String,
  pub creator_name: Option<String>,
  /// Must confirm `nationality`.
  pub declaration:  SelfDeclaration,
}

/// `POST /petitions` — returns 201 + the stored [`Petition`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PetitionStore + 'static,
{
  if !nationality::is_known(&body.nationality) {
    return Err(ApiError::BadRequest(format!(
      "unknown nationality {:?}",
      body.nationality
    )));
  }
  if !body.declaration.confirms(&body.nationality) {
    return Err(ApiError::BadRequest(
      "self-declaration does not confirm the petition nationality".into(),
    ));
  }

  let creator = body
    .creator_name
    .filter(|c| !c.trim().is_empty())
    .unwrap_or_else(|| ANONYMOUS_CREATOR.to_owned());

  let petition = state
    .petitions
    .create(NewPetition::new(
      body.title,
      body.description,
      body.nationality,
      creator,
    ))
    .await?;

  tracing::info!(petition_id = %petition.id, "petition created");
  Ok((StatusCode::CREATED, Json(petition)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /petitions/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Petition>, ApiError>
where
  S: PetitionStore + 'static,
{
  let petition = state
    .petitions
    .get_by_id(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("petition {id} not found")))?;
  Ok(Json(petition))
}
