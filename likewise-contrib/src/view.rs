//! The contribution-view activation pipeline.
//!
//! Gate on identity, fetch the idea and the caller's contributions,
//! derive the snapshot, publish it once. Tab selection lives apart in
//! [`crate::tabs`] and never re-enters this pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use likewise_model::newest_first;

use crate::collaborator::traits::{
    ContributionStore, IdentityGate, Navigator, NoticeKind, Notifier, StoreError,
};
use crate::config::ViewConfig;
use crate::snapshot::ViewSnapshot;

/// Error kinds reported by an activation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ViewError {
    /// No active session; the caller was redirected to sign in
    #[error("sign-in required")]
    AuthRequired,

    /// The idea does not exist or is not accessible
    #[error("idea not found: {id}")]
    NotFound { id: String },

    /// Transient retrieval failure; recovery is a user-initiated
    /// re-activation of the view
    #[error("query failed: {0}")]
    Query(String),
}

impl From<StoreError> for ViewError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => ViewError::NotFound { id },
            other => ViewError::Query(other.to_string()),
        }
    }
}

/// Where the view is in its lifecycle.
///
/// Loading always resolves: every activation ends in `Ready` (possibly
/// with a failure recorded on the snapshot) or back in `Idle` after an
/// auth abort or teardown.
#[derive(Debug, Clone, Default)]
pub enum ViewPhase {
    /// No activation yet, or the last one was aborted or torn down
    #[default]
    Idle,
    /// Retrievals in flight
    Loading,
    /// One activation's snapshot
    Ready(Arc<ViewSnapshot>),
}

impl ViewPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewPhase::Loading)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ViewPhase::Idle)
    }

    /// The published snapshot, when ready.
    pub fn snapshot(&self) -> Option<&Arc<ViewSnapshot>> {
        match self {
            ViewPhase::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// The contribution-detail view pipeline.
///
/// Holds the external collaborators behind trait objects and publishes
/// one immutable snapshot per activation. Re-activation discards the
/// prior snapshot entirely and restarts from the identity gate.
pub struct ContributionView {
    config: ViewConfig,
    identity: Arc<dyn IdentityGate>,
    store: Arc<dyn ContributionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    phase: Arc<RwLock<ViewPhase>>,
    /// Monotonic activation counter; a completion whose generation is
    /// no longer current is discarded instead of published.
    generation: AtomicU64,
}

impl ContributionView {
    /// Create a view over the given collaborators.
    pub fn new(
        identity: Arc<dyn IdentityGate>,
        store: Arc<dyn ContributionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config: ViewConfig::default(),
            identity,
            store,
            navigator,
            notifier,
            phase: Arc::new(RwLock::new(ViewPhase::Idle)),
            generation: AtomicU64::new(0),
        }
    }

    /// Create with configuration.
    pub fn with_config(mut self, config: ViewConfig) -> Self {
        self.config = config;
        self
    }

    /// The current lifecycle phase.
    pub async fn phase(&self) -> ViewPhase {
        self.phase.read().await.clone()
    }

    /// The published snapshot, when one is ready.
    pub async fn snapshot(&self) -> Option<Arc<ViewSnapshot>> {
        self.phase.read().await.snapshot().cloned()
    }

    /// Run one activation for `idea_id`.
    ///
    /// The identity gate is consulted exactly once, before anything
    /// else; an unauthenticated caller is redirected to sign-in and no
    /// storage retrieval is issued. Retrieval failures resolve the
    /// activation into a degraded snapshot rather than an error — only
    /// the auth abort is an `Err`.
    pub async fn activate(&self, idea_id: &str) -> Result<Arc<ViewSnapshot>, ViewError> {
        let Some(session) = self.identity.current_session().await else {
            warn!(idea_id, "activation without a session");
            self.notifier
                .notify(NoticeKind::Error, "Please sign in to view contributions")
                .await;
            self.navigator.redirect(&self.config.sign_in_path).await;
            return Err(ViewError::AuthRequired);
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(generation, ViewPhase::Loading).await;
        info!(idea_id, user_id = %session.user_id, "loading contribution view");

        let snapshot = Arc::new(self.load(idea_id, &session.user_id).await);

        if !self
            .publish(generation, ViewPhase::Ready(Arc::clone(&snapshot)))
            .await
        {
            // The view moved on while this activation was in flight;
            // its result must not overwrite the successor's state.
            debug!(idea_id, generation, "discarding stale activation result");
        }

        Ok(snapshot)
    }

    /// Tear down the current activation.
    ///
    /// Any retrieval still in flight becomes stale and its result is
    /// discarded on arrival.
    pub async fn deactivate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut phase = self.phase.write().await;
        *phase = ViewPhase::Idle;
        debug!("contribution view deactivated");
    }

    /// Request navigation back to the dashboard.
    pub async fn back_to_dashboard(&self) {
        self.navigator.redirect(&self.config.dashboard_path).await;
    }

    /// Sequential retrievals with independent failure reporting.
    ///
    /// Each failure resolves the load into a snapshot carrying whatever
    /// was already retrieved; the loading phase never wedges.
    async fn load(&self, idea_id: &str, contributor_id: &str) -> ViewSnapshot {
        let idea = match self.store.get_idea(idea_id).await {
            Ok(idea) => idea,
            Err(err) => {
                let error = ViewError::from(err);
                warn!(idea_id, %error, "idea retrieval failed");
                self.notifier
                    .notify(NoticeKind::Error, "Failed to load idea")
                    .await;
                // A hard idea failure suppresses the contribution fetch.
                return ViewSnapshot::new(None, Vec::new()).with_failure(error);
            }
        };

        match self.store.list_contributions(idea_id, contributor_id).await {
            Ok(contributions) => {
                if !newest_first(&contributions) {
                    // Fetch-layer defect: surface it, don't re-sort.
                    warn!(idea_id, "store returned contributions out of order");
                    self.notifier
                        .notify(NoticeKind::Error, "Failed to load contributions")
                        .await;
                    return ViewSnapshot::new(Some(idea), Vec::new())
                        .with_failure(StoreError::Unordered.into());
                }

                debug!(idea_id, count = contributions.len(), "contributions loaded");
                ViewSnapshot::new(Some(idea), contributions)
            }
            Err(err) => {
                let error = ViewError::from(err);
                warn!(idea_id, %error, "contribution retrieval failed");
                self.notifier
                    .notify(NoticeKind::Error, "Failed to load contributions")
                    .await;
                // Idea metadata already retrieved stays displayed.
                ViewSnapshot::new(Some(idea), Vec::new()).with_failure(error)
            }
        }
    }

    /// Publish a phase transition unless this activation has been
    /// superseded. Returns whether the write happened.
    async fn publish(&self, generation: u64, phase: ViewPhase) -> bool {
        let mut guard = self.phase.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *guard = phase;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use likewise_model::{Contribution, ContributionKind, Idea};

    use crate::collaborator::mock::{MockIdentity, MockNavigator, MockNotifier, MockStore};

    struct Harness {
        identity: Arc<MockIdentity>,
        store: Arc<MockStore>,
        navigator: Arc<MockNavigator>,
        notifier: Arc<MockNotifier>,
        view: ContributionView,
    }

    impl Harness {
        fn new(identity: MockIdentity, store: MockStore) -> Self {
            let identity = Arc::new(identity);
            let store = Arc::new(store);
            let navigator = Arc::new(MockNavigator::new());
            let notifier = Arc::new(MockNotifier::new());
            let view = ContributionView::new(
                identity.clone(),
                store.clone(),
                navigator.clone(),
                notifier.clone(),
            );
            Self {
                identity,
                store,
                navigator,
                notifier,
                view,
            }
        }
    }

    fn idea() -> Idea {
        Idea {
            id: "idea-1".to_string(),
            title: "EcoTrack".to_string(),
            description: "Carbon footprint tracker".to_string(),
        }
    }

    /// Rows in descending `created_at`, newest first, as the store
    /// contract requires.
    fn timeline(kinds: &[ContributionKind]) -> Vec<Contribution> {
        let base = Utc::now();
        kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                Contribution::new("idea-1", "user-1", *kind, format!("c{}", i + 1))
                    .with_created_at(base - Duration::minutes(i as i64))
            })
            .collect()
    }

    #[tokio::test]
    async fn unauthenticated_activation_issues_no_retrievals() {
        let harness = Harness::new(MockIdentity::signed_out(), MockStore::new());

        let result = harness.view.activate("idea-1").await;

        assert!(matches!(result, Err(ViewError::AuthRequired)));
        assert_eq!(harness.store.total_calls(), 0);
        assert_eq!(harness.navigator.redirects(), vec!["/auth"]);
        assert!(harness.view.phase().await.is_idle());
    }

    #[tokio::test]
    async fn activation_publishes_a_derived_snapshot() {
        use ContributionKind::*;
        let store = MockStore::new()
            .with_idea(idea())
            .with_contributions(timeline(&[Code, Design, Code, Research, Design]));
        let harness = Harness::new(MockIdentity::signed_in("user-1"), store);

        let snapshot = harness.view.activate("idea-1").await.unwrap();

        assert!(snapshot.is_complete());
        assert_eq!(snapshot.idea.as_ref().unwrap().title, "EcoTrack");
        assert_eq!(snapshot.stats.total, 5);
        assert_eq!(snapshot.stats.code, 2);
        assert_eq!(snapshot.stats.design_plus_research, 3);
        assert_eq!(snapshot.partition.code.len(), 2);
        assert_eq!(snapshot.partition.design.len(), 2);
        assert_eq!(snapshot.partition.research.len(), 1);

        // Newest-first order survives into the snapshot untouched.
        assert_eq!(snapshot.contributions[0].title, "c1");
        assert_eq!(snapshot.contributions[4].title, "c5");

        let published = harness.view.snapshot().await.unwrap();
        assert_eq!(published.stats, snapshot.stats);
    }

    #[tokio::test]
    async fn empty_store_resolves_to_an_empty_snapshot() {
        let store = MockStore::new().with_idea(idea());
        let harness = Harness::new(MockIdentity::signed_in("user-1"), store);

        let snapshot = harness.view.activate("idea-1").await.unwrap();

        assert!(snapshot.is_complete());
        assert_eq!(snapshot.stats, crate::stats::ContributionStats::default());
        assert!(!harness.view.phase().await.is_loading());
        assert!(harness.notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn missing_idea_is_reported_and_suppresses_the_list_fetch() {
        let harness = Harness::new(MockIdentity::signed_in("user-1"), MockStore::new());

        let snapshot = harness.view.activate("gone").await.unwrap();

        assert!(matches!(
            snapshot.failure,
            Some(ViewError::NotFound { .. })
        ));
        assert!(snapshot.idea.is_none());
        assert_eq!(harness.store.list_calls(), 0);
        assert_eq!(harness.notifier.errors(), vec!["Failed to load idea"]);
        // Loading resolved despite the failure.
        assert!(!harness.view.phase().await.is_loading());
    }

    #[tokio::test]
    async fn list_failure_keeps_the_idea_displayed() {
        let store = MockStore::new()
            .with_idea(idea())
            .with_list_error(StoreError::Network("connection reset".to_string()));
        let harness = Harness::new(MockIdentity::signed_in("user-1"), store);

        let snapshot = harness.view.activate("idea-1").await.unwrap();

        assert!(matches!(snapshot.failure, Some(ViewError::Query(_))));
        assert_eq!(snapshot.idea.as_ref().unwrap().id, "idea-1");
        assert_eq!(
            harness.notifier.errors(),
            vec!["Failed to load contributions"]
        );
    }

    #[tokio::test]
    async fn out_of_order_rows_resolve_as_a_load_failure() {
        use ContributionKind::*;
        let mut rows = timeline(&[Code, Research]);
        rows.reverse(); // oldest first: violates the store contract
        let store = MockStore::new().with_idea(idea()).with_contributions(rows);
        let harness = Harness::new(MockIdentity::signed_in("user-1"), store);

        let snapshot = harness.view.activate("idea-1").await.unwrap();

        assert!(matches!(snapshot.failure, Some(ViewError::Query(_))));
        assert!(snapshot.contributions.is_empty());
    }

    #[tokio::test]
    async fn reactivation_restarts_from_the_gate() {
        let store = MockStore::new().with_idea(idea());
        let harness = Harness::new(MockIdentity::signed_in("user-1"), store);

        harness.view.activate("idea-1").await.unwrap();
        harness.view.activate("idea-1").await.unwrap();

        assert_eq!(harness.identity.call_count(), 2);
        assert_eq!(harness.store.get_idea_calls(), 2);
    }

    #[tokio::test]
    async fn deactivation_returns_to_idle() {
        let store = MockStore::new().with_idea(idea());
        let harness = Harness::new(MockIdentity::signed_in("user-1"), store);

        harness.view.activate("idea-1").await.unwrap();
        assert!(harness.view.snapshot().await.is_some());

        harness.view.deactivate().await;
        assert!(harness.view.phase().await.is_idle());
    }

    #[tokio::test]
    async fn back_navigation_goes_to_the_dashboard() {
        let harness = Harness::new(MockIdentity::signed_in("user-1"), MockStore::new());
        harness.view.back_to_dashboard().await;
        assert_eq!(harness.navigator.redirects(), vec!["/dashboard"]);
    }
}
