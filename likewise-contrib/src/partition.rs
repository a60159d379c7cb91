//! Order-preserving categorization of a contribution sequence.

use likewise_model::{Contribution, ContributionKind};

/// Per-category subsets of one contribution sequence.
///
/// Subsets preserve the relative order of the input, and together hold
/// every element exactly once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub research: Vec<Contribution>,
    pub design: Vec<Contribution>,
    pub code: Vec<Contribution>,
}

impl Partition {
    /// Partition a sequence in a single pass.
    pub fn of(contributions: &[Contribution]) -> Self {
        let mut partition = Partition::default();
        for contribution in contributions {
            match contribution.kind {
                ContributionKind::Research => partition.research.push(contribution.clone()),
                ContributionKind::Design => partition.design.push(contribution.clone()),
                ContributionKind::Code => partition.code.push(contribution.clone()),
            }
        }
        partition
    }

    /// The subset for one category.
    pub fn by_kind(&self, kind: ContributionKind) -> &[Contribution] {
        match kind {
            ContributionKind::Research => &self.research,
            ContributionKind::Design => &self.design,
            ContributionKind::Code => &self.code,
        }
    }

    /// Total elements across all subsets.
    pub fn len(&self) -> usize {
        self.research.len() + self.design.len() + self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
