//! The immutable product of one view activation.

use chrono::{DateTime, Utc};

use likewise_model::{Contribution, Idea};

use crate::partition::Partition;
use crate::stats::ContributionStats;
use crate::view::ViewError;

/// Everything one activation loaded and derived.
///
/// Derivations are computed once from the same sequence; a refetch
/// builds a whole new snapshot rather than mutating this one, so stats
/// can never go stale against the rows they were derived from.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    /// Idea metadata, when its retrieval succeeded
    pub idea: Option<Idea>,
    /// The caller's contributions to the idea, newest first
    pub contributions: Vec<Contribution>,
    /// Per-category subsets of `contributions`
    pub partition: Partition,
    /// Summary counts over `contributions`
    pub stats: ContributionStats,
    /// The retrieval failure this snapshot was built under, if any
    pub failure: Option<ViewError>,
    /// When the activation resolved
    pub loaded_at: DateTime<Utc>,
}

impl ViewSnapshot {
    /// Build a snapshot and its derivations from one load.
    pub fn new(idea: Option<Idea>, contributions: Vec<Contribution>) -> Self {
        let partition = Partition::of(&contributions);
        let stats = ContributionStats::of(&contributions);

        Self {
            idea,
            contributions,
            partition,
            stats,
            failure: None,
            loaded_at: Utc::now(),
        }
    }

    /// Record the failure a degraded load resolved under.
    pub fn with_failure(mut self, failure: ViewError) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Whether the load completed without any reported failure.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}
