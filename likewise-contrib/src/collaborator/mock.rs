//! Mock collaborators for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use likewise_model::{Contribution, Idea, Session};

use super::traits::{
    ContributionStore, IdentityGate, Navigator, NoticeKind, Notifier, StoreError,
};

/// Identity gate with a fixed answer.
pub struct MockIdentity {
    session: Option<Session>,
    call_count: AtomicU32,
}

impl MockIdentity {
    /// Gate that reports `user_id` as signed in.
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            session: Some(Session::new(user_id)),
            call_count: AtomicU32::new(0),
        }
    }

    /// Gate that reports no session.
    pub fn signed_out() -> Self {
        Self {
            session: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// How many times the gate was consulted.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityGate for MockIdentity {
    async fn current_session(&self) -> Option<Session> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.session.clone()
    }
}

/// In-memory store with configurable rows and failures.
///
/// Applies the same idea/contributor scoping filter as the real store,
/// and returns contribution rows exactly as configured (tests decide
/// the ordering).
#[derive(Default)]
pub struct MockStore {
    ideas: Mutex<HashMap<String, Idea>>,
    contributions: Mutex<Vec<Contribution>>,
    idea_error: Mutex<Option<StoreError>>,
    list_error: Mutex<Option<StoreError>>,
    get_idea_calls: AtomicU32,
    list_calls: AtomicU32,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an idea row.
    pub fn with_idea(self, idea: Idea) -> Self {
        self.ideas
            .lock()
            .unwrap()
            .insert(idea.id.clone(), idea);
        self
    }

    /// Set the contribution rows, returned in the given order.
    pub fn with_contributions(self, contributions: Vec<Contribution>) -> Self {
        *self.contributions.lock().unwrap() = contributions;
        self
    }

    /// Fail every `get_idea` with `error`.
    pub fn with_idea_error(self, error: StoreError) -> Self {
        *self.idea_error.lock().unwrap() = Some(error);
        self
    }

    /// Fail every `list_contributions` with `error`.
    pub fn with_list_error(self, error: StoreError) -> Self {
        *self.list_error.lock().unwrap() = Some(error);
        self
    }

    pub fn get_idea_calls(&self) -> u32 {
        self.get_idea_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Total retrievals issued against this store.
    pub fn total_calls(&self) -> u32 {
        self.get_idea_calls() + self.list_calls()
    }
}

#[async_trait]
impl ContributionStore for MockStore {
    async fn get_idea(&self, idea_id: &str) -> Result<Idea, StoreError> {
        self.get_idea_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.idea_error.lock().unwrap().clone() {
            return Err(error);
        }

        self.ideas
            .lock()
            .unwrap()
            .get(idea_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                id: idea_id.to_string(),
            })
    }

    async fn list_contributions(
        &self,
        idea_id: &str,
        contributor_id: &str,
    ) -> Result<Vec<Contribution>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.list_error.lock().unwrap().clone() {
            return Err(error);
        }

        Ok(self
            .contributions
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.idea_id == idea_id && c.contributor_id == contributor_id)
            .cloned()
            .collect())
    }
}

/// Records requested redirects.
#[derive(Default)]
pub struct MockNavigator {
    paths: Mutex<Vec<String>>,
}

impl MockNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths redirected to, in order.
    pub fn redirects(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl Navigator for MockNavigator {
    async fn redirect(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// Records emitted notices.
#[derive(Default)]
pub struct MockNotifier {
    notices: Mutex<Vec<(NoticeKind, String)>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices emitted, in order.
    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices.lock().unwrap().clone()
    }

    /// Messages of error-severity notices.
    pub fn errors(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, _)| *kind == NoticeKind::Error)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices.lock().unwrap().push((kind, message.to_string()));
    }
}
