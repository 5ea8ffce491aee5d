//! Batch creation: feature, then each abuser story, then each threat
//! scenario, then each test case, strictly in document order.
//!
//! A rejected node does not stop the walk. Its children are still submitted
//! and the server decides whether they can attach. Only a transport failure
//! ends the run early.

use pb_client::{PlaybookClient, Reply, Transport};
use pb_core::wire::{AbuseRequest, FeatureRequest, TestCaseRequest, ThreatScenarioRequest};
use pb_core::{FeatureDocument, NodeLevel, NodeOutcome, SyncReport};

use crate::error::SyncError;

pub struct SyncPipeline<'a, T> {
    client: &'a PlaybookClient<T>,
}

impl<'a, T: Transport> SyncPipeline<'a, T> {
    pub const fn new(client: &'a PlaybookClient<T>) -> Self {
        Self { client }
    }

    /// Submit `document` under `project`.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Document`] when the document has no abuser stories or a
    ///   story has no threat scenarios. Nothing is sent in that case.
    /// - [`SyncError::ProjectNotFound`] when the project lookup fails.
    /// - [`SyncError::Client`] when a call never completes.
    pub async fn run(
        &self,
        document: &FeatureDocument,
        project: &str,
    ) -> Result<SyncReport, SyncError> {
        document.validate()?;

        let lookup = self.client.read_project(project).await?;
        if !lookup.is_success() {
            return Err(SyncError::ProjectNotFound {
                project: project.to_string(),
                status: lookup.status,
            });
        }

        let mut report = SyncReport::new(project, &document.name);

        let reply = self
            .client
            .create_feature(&FeatureRequest::from_document(document, project))
            .await?;
        record(&mut report, NodeLevel::Feature, &document.name, project, &reply);

        for story in &document.abuse_cases {
            let reply = self
                .client
                .create_abuser_story(&AbuseRequest::for_story(story, &document.name))
                .await?;
            record(&mut report, NodeLevel::AbuserStory, &story.name, &document.name, &reply);

            for scenario in &story.threat_scenarios {
                let request =
                    ThreatScenarioRequest::for_scenario(scenario, &document.name, &story.name);
                let reply = self
                    .client
                    .create_threat_scenario(&scenario.kind, &request)
                    .await?;
                record(
                    &mut report,
                    NodeLevel::ThreatScenario,
                    &scenario.name,
                    &story.name,
                    &reply,
                );

                for test_case in scenario.test_cases() {
                    let reply = self
                        .client
                        .create_test_case(&TestCaseRequest::for_test_case(test_case, &scenario.name))
                        .await?;
                    record(
                        &mut report,
                        NodeLevel::TestCase,
                        &test_case.name,
                        &scenario.name,
                        &reply,
                    );
                }
            }
        }

        tracing::info!(
            feature = %document.name,
            created = report.created_count(),
            failed = report.failed_count(),
            "feature document applied"
        );
        Ok(report)
    }
}

fn record(report: &mut SyncReport, level: NodeLevel, name: &str, parent: &str, reply: &Reply) {
    let outcome = if reply.is_success() {
        tracing::info!(level = %level, name, parent, "created");
        NodeOutcome::created(level, name, parent)
    } else {
        let message = reply.error_message();
        tracing::warn!(level = %level, name, parent, status = reply.status, %message, "create rejected");
        NodeOutcome::failed(level, name, parent, reply.status, message)
    };
    report.record(outcome);
}
