//! Session identity from the external auth provider.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Proof of the caller's authenticated identity.
///
/// Issued and refreshed by the hosted auth provider; this core only
/// reads the user id to scope contribution queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Session {
    /// The authenticated user's id
    pub user_id: String,
    /// Sign-in email, when the provider exposes it
    pub email: Option<String>,
}

impl Session {
    /// Create a session for a user id.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }

    /// Attach the sign-in email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
