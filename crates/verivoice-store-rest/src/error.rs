//! Error type for `verivoice-store-rest`.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// PostgREST's code for "a single object was requested but zero (or more
/// than one) rows matched".
pub const NO_ROWS: &str = "PGRST116";

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The store answered with a non-success status.
  #[error("store responded {status}: {message}")]
  Status {
    status:  StatusCode,
    code:    Option<String>,
    message: String,
  },

  #[error("invalid configuration: {0}")]
  Config(String),
}

impl Error {
  pub fn is_no_rows(&self) -> bool {
    matches!(self, Self::Status { code: Some(code), .. } if code == NO_ROWS)
  }
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
  pub code:    Option<String>,
  pub message: Option<String>,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
