//! Cascading read-assembly.
//!
//! One feature lookup, one abuser-story listing, then one scenario listing
//! per story and one test-case listing per scenario. The per-story and
//! per-scenario listings run with at most `max_in_flight` requests
//! outstanding; `buffered` yields results in submission order, so the folded
//! tree keeps the server's listing order.
//!
//! A listing that comes back with a non-success status, or with a body that
//! does not decode, is logged and treated as empty. Only the feature lookup
//! itself is fatal.

use futures::stream::{self, StreamExt, TryStreamExt};
use pb_client::{Endpoint, PlaybookClient, Reply, Transport};
use pb_core::wire::{
    AbuseRequest, AbuserStoryQuery, AbuserStoryRecord, CascadingFeature, FeatureQuery,
    FeatureRecord, ScenarioQuery, TestCaseQuery, TestCaseRequest, ThreatScenarioRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SyncError;

pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Feature without its children, as shown by a non-cascading read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSummary {
    pub name: String,
    pub description: String,
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FeatureView {
    Summary(FeatureSummary),
    Cascade(CascadingFeature),
}

pub struct CascadeReader<'a, T> {
    client: &'a PlaybookClient<T>,
    max_in_flight: usize,
}

impl<'a, T: Transport> CascadeReader<'a, T> {
    pub const fn new(client: &'a PlaybookClient<T>) -> Self {
        Self {
            client,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    /// Cap concurrent listing requests. Zero is treated as one.
    #[must_use]
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Read feature `name` in `project`, with its whole subtree when
    /// `cascade` is set.
    ///
    /// # Errors
    ///
    /// - [`SyncError::FeatureNotFound`] when the feature lookup fails.
    /// - [`SyncError::Client`] when a call never completes or the feature
    ///   record cannot be decoded.
    pub async fn read(
        &self,
        name: &str,
        project: &str,
        cascade: bool,
    ) -> Result<FeatureView, SyncError> {
        let query = FeatureQuery {
            short_name: name.to_string(),
            project: project.to_string(),
        };
        let reply = self.client.read_feature(&query).await?;
        if !reply.is_success() {
            return Err(SyncError::FeatureNotFound {
                name: name.to_string(),
                project: project.to_string(),
                status: reply.status,
            });
        }

        let record: FeatureRecord = reply.data(Endpoint::FeatureRead)?;
        let short_name = non_empty_or(record.short_name, name);

        if !cascade {
            return Ok(FeatureView::Summary(FeatureSummary {
                name: short_name,
                description: record.description,
                project: non_empty_or(record.project, project),
            }));
        }

        let abuse_cases = self.abuser_stories(&short_name).await?;
        let feature = CascadingFeature {
            short_name,
            description: record.description,
            abuse_cases,
        };
        tracing::debug!(
            feature = %feature.short_name,
            abuser_stories = feature.abuse_cases.len(),
            scenarios = feature.scenario_count(),
            test_cases = feature.test_case_count(),
            "cascade assembled"
        );
        Ok(FeatureView::Cascade(feature))
    }

    async fn abuser_stories(&self, feature: &str) -> Result<Vec<AbuseRequest>, SyncError> {
        let reply = self
            .client
            .read_abuser_stories(&AbuserStoryQuery::for_feature(feature))
            .await?;
        let records: Vec<AbuserStoryRecord> = listing(&reply, Endpoint::AbusesRead, feature);

        let scenario_lists: Vec<Vec<ThreatScenarioRequest>> = stream::iter(&records)
            .map(|story| self.scenarios(&story.short_name))
            .buffered(self.max_in_flight)
            .try_collect()
            .await?;

        let mut stories: Vec<AbuseRequest> = records
            .into_iter()
            .zip(scenario_lists)
            .map(|(story, scenarios)| AbuseRequest {
                scenarios: scenarios
                    .into_iter()
                    .map(|scenario| ThreatScenarioRequest {
                        feature: non_empty_or(scenario.feature, feature),
                        abuser_story: non_empty_or(scenario.abuser_story, &story.short_name),
                        ..scenario
                    })
                    .collect(),
                short_name: story.short_name,
                description: story.description,
                feature: feature.to_string(),
            })
            .collect();

        let test_lists: Vec<Vec<TestCaseRequest>> =
            stream::iter(stories.iter().flat_map(|story| &story.scenarios))
                .map(|scenario| self.test_cases(&scenario.name))
                .buffered(self.max_in_flight)
                .try_collect()
                .await?;

        for (scenario, test_cases) in stories
            .iter_mut()
            .flat_map(|story| story.scenarios.iter_mut())
            .zip(test_lists)
        {
            scenario.test_cases = test_cases;
        }

        Ok(stories)
    }

    async fn scenarios(&self, abuser_story: &str) -> Result<Vec<ThreatScenarioRequest>, SyncError> {
        let query = ScenarioQuery {
            abuser_story: abuser_story.to_string(),
        };
        let reply = self.client.read_threat_scenarios(&query).await?;
        Ok(listing(&reply, Endpoint::ScenariosRead, abuser_story))
    }

    async fn test_cases(&self, scenario: &str) -> Result<Vec<TestCaseRequest>, SyncError> {
        let query = TestCaseQuery {
            scenario: scenario.to_string(),
        };
        let reply = self.client.read_test_cases(&query).await?;
        let records: Vec<TestCaseRequest> = listing(&reply, Endpoint::TestRead, scenario);
        Ok(records
            .into_iter()
            .filter(|test_case| !test_case.name.is_empty())
            .map(|test_case| TestCaseRequest {
                threat_scenario: non_empty_or(test_case.threat_scenario, scenario),
                ..test_case
            })
            .collect())
    }
}

/// Decode a listing reply. A rejected or undecodable listing is an empty one.
fn listing<R: DeserializeOwned>(reply: &Reply, endpoint: Endpoint, parent: &str) -> Vec<R> {
    if !reply.is_success() {
        tracing::warn!(
            endpoint = %endpoint,
            parent,
            status = reply.status,
            message = %reply.error_message(),
            "listing rejected, continuing without children"
        );
        return Vec::new();
    }
    reply.data(endpoint).unwrap_or_else(|error| {
        tracing::warn!(
            endpoint = %endpoint,
            parent,
            %error,
            "listing unreadable, continuing without children"
        );
        Vec::new()
    })
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use pb_client::testing::RecordingTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn with_feature() -> RecordingTransport {
        let transport = RecordingTransport::new();
        transport.respond(
            Endpoint::FeatureRead,
            Reply::ok(&json!({"short_name": "login", "description": "Sign-in", "project": "web"})),
        );
        transport
    }

    #[tokio::test]
    async fn summary_makes_a_single_call() {
        let client = PlaybookClient::new(with_feature());

        let view = CascadeReader::new(&client).read("login", "web", false).await.unwrap();

        assert_eq!(
            view,
            FeatureView::Summary(FeatureSummary {
                name: "login".into(),
                description: "Sign-in".into(),
                project: "web".into(),
            })
        );
        assert_eq!(client.transport().endpoints(), vec![Endpoint::FeatureRead]);
    }

    #[tokio::test]
    async fn unknown_feature_is_fatal() {
        let transport = RecordingTransport::new();
        transport.respond(Endpoint::FeatureRead, Reply::new(404, r#"{"message": "not found"}"#));
        let client = PlaybookClient::new(transport);

        let err = CascadeReader::new(&client).read("ghost", "web", true).await.unwrap_err();
        assert!(matches!(err, SyncError::FeatureNotFound { status: 404, .. }));
        assert_eq!(client.transport().calls().len(), 1);
    }

    #[tokio::test]
    async fn rejected_listing_yields_no_children() {
        let transport = with_feature();
        transport.respond(Endpoint::AbusesRead, Reply::new(500, "down"));
        let client = PlaybookClient::new(transport);

        let view = CascadeReader::new(&client).read("login", "web", true).await.unwrap();

        let FeatureView::Cascade(feature) = view else {
            panic!("expected a cascade view");
        };
        assert!(feature.abuse_cases.is_empty());
        assert_eq!(client.transport().calls().len(), 2);
    }

    #[test]
    fn zero_in_flight_is_clamped() {
        let client = PlaybookClient::new(RecordingTransport::new());
        assert_eq!(CascadeReader::new(&client).with_max_in_flight(0).max_in_flight, 1);
    }
}
