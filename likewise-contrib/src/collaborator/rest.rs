//! PostgREST-compatible client for the hosted backend.
//!
//! The platform's backend-as-a-service exposes row access as
//! `/rest/v1/<table>` with `eq.` filters and an `order` parameter, and
//! the signed-in user as `/auth/v1/user`. Works with any
//! PostgREST-compatible deployment, self-hosted or managed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::debug;

use likewise_model::{newest_first, Contribution, Idea, Session};

use super::traits::{ContributionStore, IdentityGate, StoreError};

/// Row store backed by the hosted backend's REST surface.
pub struct RestStore {
    client: Client,
    project_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl RestStore {
    /// Create a store against a project base URL.
    pub fn new(project_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            client: build_client(None),
            project_url: base_url(project_url),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    /// Create a store for a managed Supabase project.
    pub fn supabase(project_ref: &str, anon_key: impl Into<String>) -> Self {
        Self::new(format!("https://{}.supabase.co", project_ref), anon_key)
    }

    /// Attach the signed-in user's access token.
    ///
    /// Row-level security on the backend scopes contribution rows to
    /// the token's user; without it the anon key is sent as bearer.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(Some(timeout));
        self
    }

    /// The project base URL this store targets.
    pub fn project_url(&self) -> &str {
        &self.project_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
    }

    async fn fetch_rows<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let url = format!("{}/rest/v1/{}", self.project_url, table);
        let response = self
            .authorize(self.client.get(&url))
            .query(query)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Query(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ContributionStore for RestStore {
    async fn get_idea(&self, idea_id: &str) -> Result<Idea, StoreError> {
        let rows: Vec<Idea> = self
            .fetch_rows(
                "ideas",
                &[
                    ("id", format!("eq.{}", idea_id)),
                    ("select", "id,title,description".to_string()),
                ],
            )
            .await?;

        rows.into_iter().next().ok_or_else(|| StoreError::NotFound {
            id: idea_id.to_string(),
        })
    }

    async fn list_contributions(
        &self,
        idea_id: &str,
        contributor_id: &str,
    ) -> Result<Vec<Contribution>, StoreError> {
        let rows: Vec<Contribution> = self
            .fetch_rows(
                "contributions",
                &[
                    ("idea_id", format!("eq.{}", idea_id)),
                    ("contributor_id", format!("eq.{}", contributor_id)),
                    ("select", "*".to_string()),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?;

        // The ordering is the store's contract; a violation is a defect
        // to surface, not to silently correct.
        if !newest_first(&rows) {
            return Err(StoreError::Unordered);
        }

        Ok(rows)
    }
}

/// Identity gate backed by the hosted backend's auth surface.
pub struct RestIdentity {
    client: Client,
    project_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl RestIdentity {
    /// Create a gate against a project base URL.
    pub fn new(project_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            client: build_client(None),
            project_url: base_url(project_url),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    /// Attach the stored access token; without one there is no session
    /// to look up.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// `/auth/v1/user` response body, reduced to what the gate needs.
#[derive(Debug, Deserialize)]
struct UserRow {
    id: String,
    email: Option<String>,
}

#[async_trait]
impl IdentityGate for RestIdentity {
    async fn current_session(&self) -> Option<Session> {
        let token = self.access_token.as_ref()?;

        let url = format!("{}/auth/v1/user", self.project_url);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "auth user lookup rejected");
            return None;
        }

        let user: UserRow = response.json().await.ok()?;
        Some(Session {
            user_id: user.id,
            email: user.email,
        })
    }
}

fn base_url(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}

fn build_client(timeout: Option<Duration>) -> Client {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );

    let mut builder = Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().expect("Failed to create HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use likewise_model::ContributionKind;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn contribution_row(id: &str, kind: &str, created_at: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": kind,
            "title": format!("contribution {}", id),
            "description": null,
            "content": {},
            "created_at": created_at,
            "idea_id": "idea-1",
            "contributor_id": "user-1",
        })
    }

    #[test]
    fn supabase_helper_targets_the_project_domain() {
        let store = RestStore::supabase("likewise-prod", "anon");
        assert_eq!(store.project_url(), "https://likewise-prod.supabase.co");
    }

    #[test]
    fn timeout_comes_from_the_view_config() {
        let config = crate::config::ViewConfig::default();
        let _store = RestStore::new("http://localhost", "anon")
            .with_timeout(config.request_timeout());
        assert_eq!(config.request_timeout().as_secs(), 30);
    }

    #[tokio::test]
    async fn fetches_an_idea_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/ideas"))
            .and(query_param("id", "eq.idea-1"))
            .and(header("apikey", "anon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "idea-1", "title": "EcoTrack", "description": "Carbon tracker"}
            ])))
            .mount(&server)
            .await;

        let store = RestStore::new(server.uri(), "anon");
        let idea = store.get_idea("idea-1").await.unwrap();
        assert_eq!(idea.title, "EcoTrack");
    }

    #[tokio::test]
    async fn missing_idea_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/ideas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let store = RestStore::new(server.uri(), "anon");
        match store.get_idea("gone").await {
            Err(StoreError::NotFound { id }) => assert_eq!(id, "gone"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn backend_failure_is_a_query_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/ideas"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let store = RestStore::new(server.uri(), "anon");
        assert!(matches!(
            store.get_idea("idea-1").await,
            Err(StoreError::Query(_))
        ));
    }

    #[tokio::test]
    async fn lists_contributions_scoped_and_ordered() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/contributions"))
            .and(query_param("idea_id", "eq.idea-1"))
            .and(query_param("contributor_id", "eq.user-1"))
            .and(query_param("order", "created_at.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                contribution_row("c-2", "code", "2026-03-04T12:00:00Z"),
                contribution_row("c-1", "research", "2026-03-03T09:00:00Z"),
            ])))
            .mount(&server)
            .await;

        let store = RestStore::new(server.uri(), "anon").with_access_token("jwt");
        let rows = store.list_contributions("idea-1", "user-1").await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "c-2");
        assert_eq!(rows[0].kind, ContributionKind::Code);
        assert_eq!(rows[1].kind, ContributionKind::Research);
    }

    #[tokio::test]
    async fn out_of_order_rows_are_a_store_defect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/contributions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                contribution_row("c-1", "research", "2026-03-03T09:00:00Z"),
                contribution_row("c-2", "code", "2026-03-04T12:00:00Z"),
            ])))
            .mount(&server)
            .await;

        let store = RestStore::new(server.uri(), "anon");
        assert!(matches!(
            store.list_contributions("idea-1", "user-1").await,
            Err(StoreError::Unordered)
        ));
    }

    #[tokio::test]
    async fn identity_without_a_token_has_no_session() {
        // No server: the gate must answer without issuing a request.
        let gate = RestIdentity::new("http://localhost:1", "anon");
        assert!(gate.current_session().await.is_none());
    }

    #[tokio::test]
    async fn identity_resolves_the_signed_in_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("authorization", "Bearer jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "user-1",
                "email": "jane@example.com",
            })))
            .mount(&server)
            .await;

        let gate = RestIdentity::new(server.uri(), "anon").with_access_token("jwt");
        let session = gate.current_session().await.unwrap();
        assert_eq!(session.user_id, "user-1");
        assert_eq!(session.email.as_deref(), Some("jane@example.com"));
    }

    #[tokio::test]
    async fn rejected_token_is_treated_as_signed_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let gate = RestIdentity::new(server.uri(), "anon").with_access_token("expired");
        assert!(gate.current_session().await.is_none());
    }
}
