//! Likewise contribution view - retrieval, categorization, aggregation.
//!
//! The logic behind the contribution-detail view:
//! - Trait-based external collaborators (identity, storage, navigation,
//!   notification)
//! - A gate-then-fetch activation pipeline producing immutable snapshots
//! - Pure categorization and summary statistics over each snapshot
//! - Tab selection state that never re-runs the pipeline
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            ContributionView             │
//! │   (activation pipeline + view phase)    │
//! └───────┬───────────┬───────────┬─────────┘
//!         │           │           │
//!         ▼           ▼           ▼
//! ┌────────────┐ ┌────────────┐ ┌────────────┐
//! │ Identity   │ │Contribution│ │ Navigator/ │
//! │ Gate       │ │Store (REST)│ │ Notifier   │
//! └────────────┘ └────────────┘ └────────────┘
//! ```

pub mod collaborator;
pub mod config;
pub mod partition;
pub mod snapshot;
pub mod stats;
pub mod tabs;
pub mod view;

// Re-export main types for convenience
pub use collaborator::traits::{
    ContributionStore, IdentityGate, Navigator, NoticeKind, Notifier, StoreError,
};
pub use config::ViewConfig;
pub use partition::Partition;
pub use snapshot::ViewSnapshot;
pub use stats::ContributionStats;
pub use tabs::{Tab, TabPane, TabView};
pub use view::{ContributionView, ViewError, ViewPhase};
