//! External collaborator abstraction layer.
//!
//! The platform delegates persistence and auth to a hosted backend;
//! these modules are the seams the pipeline consumes it through:
//! - Trait contracts for identity, storage, navigation, notification
//! - A PostgREST-compatible client for the hosted backend
//! - Mock collaborators for testing

pub mod mock;
pub mod rest;
pub mod traits;

pub use mock::{MockIdentity, MockNavigator, MockNotifier, MockStore};
pub use rest::{RestIdentity, RestStore};
pub use traits::{ContributionStore, IdentityGate, Navigator, NoticeKind, Notifier, StoreError};
