//! The closed contribution category set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Category of a contribution.
///
/// The backend stores this as a lowercase string tag; no other value is
/// valid. Every match on this enum is exhaustive, so adding a category
/// is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum ContributionKind {
    /// Background research and analysis
    Research,
    /// Visual and interaction design
    Design,
    /// Source code
    Code,
}

impl ContributionKind {
    /// All categories, in display order.
    pub const ALL: [ContributionKind; 3] = [
        ContributionKind::Research,
        ContributionKind::Design,
        ContributionKind::Code,
    ];

    /// Wire form of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Design => "design",
            Self::Code => "code",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Research => "Research",
            Self::Design => "Design",
            Self::Code => "Code",
        }
    }

    /// Lucide icon name the frontend renders for this category.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Research => "file-text",
            Self::Design => "palette",
            Self::Code => "code",
        }
    }

    /// Theme accent token for badges and icon chips.
    pub fn accent(&self) -> &'static str {
        match self {
            Self::Research => "secondary",
            Self::Design => "accent",
            Self::Code => "primary",
        }
    }
}

impl fmt::Display for ContributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a category tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contribution kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for ContributionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "research" => Ok(Self::Research),
            "design" => Ok(Self::Design),
            "code" => Ok(Self::Code),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}
