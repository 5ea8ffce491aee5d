//! Declarative authoring schema.
//!
//! A feature document is written by a user (usually as YAML) and nests the
//! whole hierarchy below one feature:
//!
//! ```yaml
//! objectType: feature
//! name: login-flow
//! description: Users log in with email and password
//! abuse_cases:
//!   - name: brute-force
//!     description: Attacker guesses passwords
//!     threat_scenarios:
//!       - name: no-lockout
//!         type: inline
//!         description: Accounts are never locked
//!         severity: 7
//!         cwe: 307
//!         test-cases:
//!           - name: attempt-1000-logins
//!             test: Try 1000 passwords against one account
//!             tools: burp,hydra
//! ```

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::DocumentError;

/// Kind of object a declarative document describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    #[serde(alias = "Feature", alias = "user_story", alias = "userStory")]
    Feature,
}

/// Root of a declarative document: one feature and everything below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureDocument {
    #[serde(rename = "objectType", default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<ObjectType>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub abuse_cases: Vec<AbuserStoryDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AbuserStoryDocument {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub threat_scenarios: Vec<ThreatScenarioDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ThreatScenarioDocument {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub kind: ScenarioKind,
}

/// Payload of a threat scenario, selected by its `type` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScenarioKind {
    /// Reference to a scenario from the server-side catalog.
    Repo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference: Option<ScenarioReference>,
    },
    /// Scenario described in full inside the document.
    Inline {
        #[serde(default)]
        severity: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cwe: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        vul_name: Option<String>,
        #[serde(rename = "test-cases", default)]
        test_cases: Vec<TestCaseDocument>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScenarioReference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub severity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TestCaseDocument {
    pub name: String,
    #[serde(default)]
    pub test: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    /// Comma-separated tool names, e.g. `burp,hydra`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,
}

impl FeatureDocument {
    /// Parse a document from YAML (JSON input is accepted as well).
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] if the input is not a structurally
    /// valid feature document.
    pub fn from_yaml_str(input: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Read and parse a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the file cannot be read and
    /// [`DocumentError::Parse`] if its content is malformed.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Authoring checks that must pass before anything is sent to the server.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NoAbuserStories`] for a feature without
    /// abuser stories and [`DocumentError::NoThreatScenarios`] for the first
    /// abuser story without threat scenarios.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.abuse_cases.is_empty() {
            return Err(DocumentError::NoAbuserStories {
                feature: self.name.clone(),
            });
        }

        if let Some(story) = self
            .abuse_cases
            .iter()
            .find(|story| story.threat_scenarios.is_empty())
        {
            return Err(DocumentError::NoThreatScenarios {
                abuser_story: story.name.clone(),
            });
        }

        Ok(())
    }

    /// Number of nodes the batch pipeline will submit for this document.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .abuse_cases
            .iter()
            .map(|story| {
                1 + story
                    .threat_scenarios
                    .iter()
                    .map(|scenario| 1 + scenario.test_cases().len())
                    .sum::<usize>()
            })
            .sum::<usize>()
    }
}

impl ThreatScenarioDocument {
    /// Test cases attached to the scenario; repo scenarios never carry any.
    #[must_use]
    pub fn test_cases(&self) -> &[TestCaseDocument] {
        match &self.kind {
            ScenarioKind::Inline { test_cases, .. } => test_cases,
            ScenarioKind::Repo { .. } => &[],
        }
    }
}

impl ScenarioKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Repo { .. } => "repo",
            Self::Inline { .. } => "inline",
        }
    }
}

impl TestCaseDocument {
    /// Tool list ready for transmission.
    #[must_use]
    pub fn tool_list(&self) -> Vec<String> {
        self.tools.as_deref().map(parse_tools).unwrap_or_default()
    }
}

/// Split a comma-separated tool field into trimmed, non-empty names.
#[must_use]
pub fn parse_tools(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tool| !tool.is_empty())
        .map(str::to_string)
        .collect()
}
