//! Self-declared nationality verification.
//!
//! The person ticks a box asserting their name and nationality. Nothing here
//! is an identity check; it only gates the create and sign flows so that the
//! declared nationality matches the petition's.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfDeclaration {
  pub nationality:   String,
  pub full_name:     String,
  pub self_verified: bool,
}

impl SelfDeclaration {
  /// True when the box was ticked and the declared nationality is exactly
  /// `required`.
  pub fn confirms(&self, required: &str) -> bool {
    self.self_verified && self.nationality == required
  }
}
