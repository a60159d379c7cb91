//! Summary counts over a contribution sequence.

use serde::{Deserialize, Serialize};

use likewise_model::{Contribution, ContributionKind};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Counts shown in the stat cards above the timeline.
///
/// `design_plus_research` is always exactly `total - code`; the three
/// categories cover the sequence with nothing dropped or counted twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ContributionStats {
    pub total: usize,
    pub code: usize,
    pub design_plus_research: usize,
}

impl ContributionStats {
    /// Compute the counts in a single pass.
    pub fn of(contributions: &[Contribution]) -> Self {
        let code = contributions
            .iter()
            .filter(|c| c.kind == ContributionKind::Code)
            .count();

        Self {
            total: contributions.len(),
            code,
            design_plus_research: contributions.len() - code,
        }
    }
}
