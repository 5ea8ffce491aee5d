//! # pb-client
//!
//! Typed calls against the ThreatPlaybook API.
//!
//! [`PlaybookClient`] wraps a [`Transport`]. Production code uses
//! [`HttpTransport`] (reqwest); tests use `testing::RecordingTransport`
//! behind the `testing` feature.
//!
//! Create and read calls return the raw [`Reply`]: a non-success status on
//! one node is something the caller records and moves past. Only account
//! calls (login, change-password) and deletes turn a non-success status into
//! [`ClientError::Api`].

mod endpoint;
mod error;
mod http;
mod reply;
mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use endpoint::Endpoint;
pub use error::ClientError;
pub use http::HttpTransport;
pub use reply::Reply;
pub use transport::Transport;

use pb_core::ScenarioKind;
use pb_core::wire::{
    AbuseRequest, AbuserStoryQuery, ChangePasswordRequest, DeleteRequest, FeatureQuery,
    FeatureRequest, LoginRequest, LoginResponse, ProjectRequest, ScenarioQuery, TestCaseQuery,
    TestCaseRequest, ThreatScenarioRequest,
};
use serde::Serialize;

pub struct PlaybookClient<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> PlaybookClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<B: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<Reply, ClientError> {
        let body = serde_json::to_value(body).map_err(|source| ClientError::Encode {
            endpoint: endpoint.name(),
            source,
        })?;
        let reply = self.transport.post(endpoint, &body).await?;
        tracing::debug!(endpoint = %endpoint, status = reply.status, "api call");
        Ok(reply)
    }

    // ── Projects ───────────────────────────────────────────────────

    pub async fn read_project(&self, name: &str) -> Result<Reply, ClientError> {
        self.call(
            Endpoint::ProjectRead,
            &ProjectRequest {
                name: name.to_string(),
            },
        )
        .await
    }

    pub async fn create_project(&self, name: &str) -> Result<Reply, ClientError> {
        self.call(
            Endpoint::ProjectCreate,
            &ProjectRequest {
                name: name.to_string(),
            },
        )
        .await
    }

    // ── Features ───────────────────────────────────────────────────

    pub async fn create_feature(&self, request: &FeatureRequest) -> Result<Reply, ClientError> {
        self.call(Endpoint::FeatureCreate, request).await
    }

    pub async fn read_feature(&self, query: &FeatureQuery) -> Result<Reply, ClientError> {
        self.call(Endpoint::FeatureRead, query).await
    }

    // ── Abuser stories ─────────────────────────────────────────────

    pub async fn create_abuser_story(&self, request: &AbuseRequest) -> Result<Reply, ClientError> {
        self.call(Endpoint::AbuseCaseCreate, request).await
    }

    pub async fn read_abuser_stories(
        &self,
        query: &AbuserStoryQuery,
    ) -> Result<Reply, ClientError> {
        self.call(Endpoint::AbusesRead, query).await
    }

    // ── Threat scenarios ───────────────────────────────────────────

    /// Submit a threat scenario to the endpoint matching its kind.
    pub async fn create_threat_scenario(
        &self,
        kind: &ScenarioKind,
        request: &ThreatScenarioRequest,
    ) -> Result<Reply, ClientError> {
        self.call(scenario_endpoint(kind), request).await
    }

    pub async fn read_threat_scenarios(&self, query: &ScenarioQuery) -> Result<Reply, ClientError> {
        self.call(Endpoint::ScenariosRead, query).await
    }

    // ── Test cases ─────────────────────────────────────────────────

    pub async fn create_test_case(&self, request: &TestCaseRequest) -> Result<Reply, ClientError> {
        self.call(Endpoint::TestCreate, request).await
    }

    pub async fn read_test_cases(&self, query: &TestCaseQuery) -> Result<Reply, ClientError> {
        self.call(Endpoint::TestRead, query).await
    }

    // ── Accounts ───────────────────────────────────────────────────

    /// Exchange credentials for an API token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on a non-success status and
    /// [`ClientError::MissingToken`] if the reply carries no token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let reply = self
            .call(Endpoint::Login, &request)
            .await?
            .require_success(Endpoint::Login)?;

        let response: LoginResponse =
            serde_json::from_str(&reply.body).map_err(|source| ClientError::Decode {
                endpoint: Endpoint::Login.name(),
                source,
            })?;
        response.into_token().ok_or(ClientError::MissingToken)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server rejects the change.
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ClientError> {
        self.call(Endpoint::ChangePassword, request)
            .await?
            .require_success(Endpoint::ChangePassword)?;
        Ok(())
    }

    // ── Deletes ────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server refuses the delete.
    pub async fn delete(&self, request: &DeleteRequest) -> Result<Reply, ClientError> {
        let endpoint = delete_endpoint(request);
        self.call(endpoint, request).await?.require_success(endpoint)
    }
}

const fn scenario_endpoint(kind: &ScenarioKind) -> Endpoint {
    match kind {
        ScenarioKind::Repo { .. } => Endpoint::ScenarioRepoCreate,
        ScenarioKind::Inline { .. } => Endpoint::ScenarioCreate,
    }
}

const fn delete_endpoint(request: &DeleteRequest) -> Endpoint {
    match request {
        DeleteRequest::Project { .. } => Endpoint::DeleteProject,
        DeleteRequest::Feature { .. } => Endpoint::DeleteFeature,
        DeleteRequest::AbuserStory { .. } => Endpoint::DeleteAbuserStory,
        DeleteRequest::Scenario { .. } => Endpoint::DeleteScenario,
        DeleteRequest::TestCase { .. } => Endpoint::DeleteTest,
    }
}
