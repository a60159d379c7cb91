//! Contracts for the external collaborators the view depends on.
//!
//! This module defines the four seams of the contribution view:
//! identity, storage, navigation, and notification.

use async_trait::async_trait;

use likewise_model::{Contribution, Idea, Session};

/// Error types for storage retrievals.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The referenced row does not exist or is not visible to the caller
    #[error("not found: {id}")]
    NotFound { id: String },

    /// The backend rejected or failed the query
    #[error("query failed: {0}")]
    Query(String),

    /// Transport-level failure
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not decode
    #[error("parse error: {0}")]
    Parse(String),

    /// The store returned contributions out of newest-first order
    #[error("store violated newest-first ordering")]
    Unordered,
}

/// Source of the caller's authenticated identity.
///
/// Consulted exactly once per view activation; `None` aborts the
/// pipeline before any storage retrieval is issued.
#[async_trait]
pub trait IdentityGate: Send + Sync {
    /// The active session, if any.
    async fn current_session(&self) -> Option<Session>;
}

/// Read access to ideas and the caller's own contributions.
#[async_trait]
pub trait ContributionStore: Send + Sync {
    /// Fetch one idea by id.
    ///
    /// Unscoped by caller identity: any authenticated caller may read
    /// idea metadata.
    async fn get_idea(&self, idea_id: &str) -> Result<Idea, StoreError>;

    /// Fetch the caller's contributions to one idea, newest first.
    ///
    /// The store owns both the scoping filter (idea AND contributor)
    /// and the descending `created_at` ordering; callers must not
    /// re-sort what they receive.
    async fn list_contributions(
        &self,
        idea_id: &str,
        contributor_id: &str,
    ) -> Result<Vec<Contribution>, StoreError>;
}

/// Navigation requests to the hosting shell.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Ask the shell to route to `path`.
    async fn redirect(&self, path: &str);
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

/// Fire-and-forget user notifications (toasts in the SPA).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, kind: NoticeKind, message: &str);
}
