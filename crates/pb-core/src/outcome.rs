//! Per-node outcomes of a batch creation run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Level of a node in the feature hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeLevel {
    Feature,
    AbuserStory,
    ThreatScenario,
    TestCase,
}

impl NodeLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::AbuserStory => "abuser story",
            Self::ThreatScenario => "threat scenario",
            Self::TestCase => "test case",
        }
    }
}

impl fmt::Display for NodeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Created,
    Failed { status: u16, message: String },
}

/// What happened to one submitted node. Exactly one is recorded per node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeOutcome {
    pub level: NodeLevel,
    pub name: String,
    /// Name of the parent the node was submitted under (project for features).
    pub parent: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl NodeOutcome {
    #[must_use]
    pub fn created(level: NodeLevel, name: &str, parent: &str) -> Self {
        Self {
            level,
            name: name.to_string(),
            parent: parent.to_string(),
            status: OutcomeStatus::Created,
        }
    }

    #[must_use]
    pub fn failed(level: NodeLevel, name: &str, parent: &str, status: u16, message: String) -> Self {
        Self {
            level,
            name: name.to_string(),
            parent: parent.to_string(),
            status: OutcomeStatus::Failed { status, message },
        }
    }

    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self.status, OutcomeStatus::Created)
    }
}

impl fmt::Display for NodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            OutcomeStatus::Created => write!(f, "created {} '{}'", self.level, self.name),
            OutcomeStatus::Failed { status, .. } => write!(
                f,
                "unable to create {} '{}' under '{}' (HTTP {status})",
                self.level, self.name, self.parent
            ),
        }
    }
}

/// Ordered outcome list for one feature document, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub project: String,
    pub feature: String,
    pub outcomes: Vec<NodeOutcome>,
}

impl SyncReport {
    #[must_use]
    pub fn new(project: &str, feature: &str) -> Self {
        Self {
            project: project.to_string(),
            feature: feature.to_string(),
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: NodeOutcome) {
        self.outcomes.push(outcome);
    }

    /// Whether the feature node itself was created.
    #[must_use]
    pub fn feature_created(&self) -> bool {
        self.outcomes
            .iter()
            .find(|outcome| outcome.level == NodeLevel::Feature)
            .is_some_and(NodeOutcome::is_created)
    }

    pub fn failures(&self) -> impl Iterator<Item = &NodeOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_created())
    }

    #[must_use]
    pub fn created_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_created()).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.created_count()
    }

    /// Outcomes recorded at one level, in submission order.
    pub fn at_level(&self, level: NodeLevel) -> impl Iterator<Item = &NodeOutcome> {
        self.outcomes
            .iter()
            .filter(move |outcome| outcome.level == level)
    }
}
