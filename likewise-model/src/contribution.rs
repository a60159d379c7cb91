//! Contribution - one unit of work submitted against an idea.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kind::ContributionKind;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// One unit of work (research, design, or code) submitted by a single
/// author against a single idea.
///
/// Created and mutated by the authoring flows; the contribution view
/// reads these rows and never writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Contribution {
    /// Unique identifier
    pub id: String,
    /// Category tag; the backend column is named `type`
    #[serde(rename = "type")]
    pub kind: ContributionKind,
    /// Short display name
    pub title: String,
    /// Optional free text
    #[serde(default)]
    pub description: Option<String>,
    /// Opaque payload; the view never interprets it
    #[serde(default)]
    pub content: serde_json::Value,
    /// Submission time, the sort key for the timeline
    pub created_at: DateTime<Utc>,
    /// The idea this was submitted against
    pub idea_id: String,
    /// The submitting user
    pub contributor_id: String,
}

impl Contribution {
    /// Create a new contribution stamped now.
    pub fn new(
        idea_id: impl Into<String>,
        contributor_id: impl Into<String>,
        kind: ContributionKind,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            description: None,
            content: serde_json::Value::Null,
            created_at: Utc::now(),
            idea_id: idea_id.into(),
            contributor_id: contributor_id.into(),
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach the opaque payload.
    pub fn with_content(mut self, content: serde_json::Value) -> Self {
        self.content = content;
        self
    }

    /// Override the submission time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Short display date for the timeline, e.g. "Mar 04, 2026".
    pub fn created_label(&self) -> String {
        self.created_at.format("%b %d, %Y").to_string()
    }
}

/// Check the store's descending `created_at` contract.
///
/// Equal timestamps are fine; only an ascending step violates it.
pub fn newest_first(contributions: &[Contribution]) -> bool {
    contributions
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at)
}
