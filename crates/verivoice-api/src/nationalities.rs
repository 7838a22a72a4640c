//! Handler for `GET /nationalities`.

use axum::Json;
use verivoice_core::nationality::NATIONALITIES;

/// `GET /nationalities` — the fixed list offered by the creation form.
pub async fn list() -> Json<&'static [&'static str]> { Json(NATIONALITIES) }
