//! Idea - the parent project entity.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// A proposed project that contributions are submitted against.
///
/// Owned and mutated by the authoring flows; the contribution view only
/// reads a snapshot of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Idea {
    /// Unique identifier
    pub id: String,
    /// Short display name
    pub title: String,
    /// Free-text pitch
    pub description: String,
}

impl Idea {
    /// Create a new idea with a generated id.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}
