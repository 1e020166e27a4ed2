//! Named pattern library with replace-on-save semantics.
//!
//! The library owns every saved pattern; the front of the list is the most
//! recently saved entry. Sorting and searching return views and never
//! reorder the underlying collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::SavedState;
use crate::error::{IoError, Result};

/// Longest accepted pattern name, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// A named, timestamped saved board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub created: DateTime<Utc>,
    pub state: SavedState,
}

/// Orderings offered for listing saved patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOrder {
    /// Case-insensitive name, ascending
    NameAscending,
    /// Oldest first
    CreatedAscending,
    /// Newest first
    CreatedDescending,
    /// Densest pattern first
    CellCountDescending,
}

/// The ordered collection of saved patterns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
}

impl PatternLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves `state` under `name`, replacing any existing pattern with the
    /// same name (case-sensitive exact match). The new entry lands at the
    /// front of iteration order with `created = now`.
    ///
    /// # Errors
    /// [`IoError::InvalidName`] if the trimmed name is empty of
    /// alphanumerics or longer than [`MAX_NAME_LEN`] characters.
    pub fn save(&mut self, name: &str, state: SavedState) -> Result<&Pattern> {
        let name = validate_name(name)?;
        self.patterns.retain(|p| p.name != name);
        self.patterns.insert(
            0,
            Pattern {
                name,
                created: Utc::now(),
                state,
            },
        );
        Ok(&self.patterns[0])
    }

    /// Removes the pattern named `name`. Returns whether anything was
    /// removed; a missing name is not an error.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.patterns.len();
        self.patterns.retain(|p| p.name != name);
        self.patterns.len() != before
    }

    /// Removes every saved pattern.
    pub fn clear(&mut self) {
        self.patterns.clear();
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the patterns in the requested order without mutating the
    /// collection. The sort is stable.
    #[must_use]
    pub fn sorted_by(&self, order: PatternOrder) -> Vec<&Pattern> {
        let mut view: Vec<&Pattern> = self.patterns.iter().collect();
        match order {
            PatternOrder::NameAscending => {
                view.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
            PatternOrder::CreatedAscending => view.sort_by_key(|p| p.created),
            PatternOrder::CreatedDescending => {
                view.sort_by_key(|p| std::cmp::Reverse(p.created));
            }
            PatternOrder::CellCountDescending => {
                view.sort_by_key(|p| std::cmp::Reverse(p.state.cells.len()));
            }
        }
        view
    }

    /// Case-insensitive substring match on the pattern name. The query is
    /// trimmed; an empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Pattern> {
        let needle = query.trim().to_lowercase();
        self.patterns
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if !trimmed.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err(IoError::invalid_name(
            "must contain at least one alphanumeric character",
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(IoError::invalid_name(format!(
            "longer than {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
