//! In-memory filtering for the petition list view.

use serde::{Deserialize, Serialize};

use crate::petition::{Petition, PetitionStatus};

/// Status and free-text filter applied over the result of
/// [`PetitionRepository::list_all`](crate::repository::PetitionRepository::list_all).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetitionFilter {
  /// `None` keeps every status.
  pub status: Option<PetitionStatus>,
  /// Case-insensitive substring over title, description and nationality.
  /// Blank text matches everything.
  pub text:   Option<String>,
}

impl PetitionFilter {
  pub fn matches(&self, petition: &Petition) -> bool {
    if let Some(status) = self.status
      && petition.status != status
    {
      return false;
    }

    let needle = match self.text.as_deref().map(str::trim) {
      Some(t) if !t.is_empty() => t.to_lowercase(),
      _ => return true,
    };

    [&petition.title, &petition.description, &petition.nationality]
      .iter()
      .any(|field| field.to_lowercase().contains(&needle))
  }

  /// Keep matching petitions, preserving order.
  pub fn apply(&self, petitions: Vec<Petition>) -> Vec<Petition> {
    petitions.into_iter().filter(|p| self.matches(p)).collect()
  }
}
