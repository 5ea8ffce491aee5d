//! Wire schema: request and response bodies exchanged with the ThreatPlaybook API.
//!
//! Requests reference their parent by name (short name for features and abuser
//! stories, name for threat scenarios). Fields that do not apply to a request
//! are omitted from the JSON body instead of being sent as zero values.

use serde::{Deserialize, Deserializer, Serialize};

use crate::document::{
    AbuserStoryDocument, FeatureDocument, ScenarioKind, TestCaseDocument, ThreatScenarioDocument,
};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Response envelope ──────────────────────────────────────────────

/// Top-level `{success, error, message, data}` shape of every API response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Default + Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: T,
}

// ── Projects ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

// ── Features ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRequest {
    pub short_name: String,
    pub description: String,
    pub project: String,
}

impl FeatureRequest {
    #[must_use]
    pub fn from_document(feature: &FeatureDocument, project: &str) -> Self {
        Self {
            short_name: feature.name.clone(),
            description: feature.description.clone(),
            project: project.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureQuery {
    pub short_name: String,
    pub project: String,
}

/// Feature as returned by the feature-read endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project: String,
}

// ── Abuser stories ─────────────────────────────────────────────────

/// Abuser-story create body; also the abuser-story node of the cascade output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbuseRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feature: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scenarios: Vec<ThreatScenarioRequest>,
}

impl AbuseRequest {
    #[must_use]
    pub fn for_story(story: &AbuserStoryDocument, feature: &str) -> Self {
        Self {
            short_name: story.name.clone(),
            description: story.description.clone(),
            feature: feature.to_string(),
            scenarios: Vec::new(),
        }
    }
}

/// Abuser-story lookup, either every story of a feature or one by short name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbuserStoryQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
}

impl AbuserStoryQuery {
    #[must_use]
    pub fn for_feature(feature: &str) -> Self {
        Self {
            user_story: Some(feature.to_string()),
            short_name: None,
        }
    }
}

/// Abuser story as returned by the abuses-read endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbuserStoryRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

// ── Threat scenarios ───────────────────────────────────────────────

/// Threat-scenario create body; also the record returned by scenarios-read
/// and the scenario node of the cascade output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatScenarioRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feature: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub abuser_story: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub scenario_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vul_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_cases: Vec<TestCaseRequest>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub categories: Vec<String>,
}

impl ThreatScenarioRequest {
    /// Build the create body for `scenario`, forwarding only the fields that
    /// belong to its kind.
    ///
    /// A repo reference is forwarded only when it names a catalog entry and
    /// carries a positive severity. A CWE of `0` counts as absent.
    #[must_use]
    pub fn for_scenario(scenario: &ThreatScenarioDocument, feature: &str, abuser_story: &str) -> Self {
        let mut request = Self {
            name: scenario.name.clone(),
            feature: feature.to_string(),
            abuser_story: abuser_story.to_string(),
            description: scenario.description.clone(),
            scenario_type: Some(scenario.kind.as_str().to_string()),
            ..Self::default()
        };

        match &scenario.kind {
            ScenarioKind::Repo { reference } => {
                if let Some(reference) = reference
                    .as_ref()
                    .filter(|reference| !reference.name.is_empty() && reference.severity > 0)
                {
                    request.repo_name = Some(reference.name.clone());
                    request.severity = Some(reference.severity);
                }
            }
            ScenarioKind::Inline {
                severity,
                cwe,
                vul_name,
                ..
            } => {
                request.severity = Some(*severity);
                request.cwe = cwe.filter(|cwe| *cwe != 0);
                request.vul_name = vul_name.clone().filter(|name| !name.is_empty());
            }
        }

        request
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioQuery {
    pub abuser_story: String,
}

// ── Test cases ─────────────────────────────────────────────────────

/// Test-case create body; also the record returned by test-read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_case: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub threat_scenario: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
}

impl TestCaseRequest {
    #[must_use]
    pub fn for_test_case(test_case: &TestCaseDocument, threat_scenario: &str) -> Self {
        Self {
            name: test_case.name.clone(),
            test_case: test_case.test.clone(),
            threat_scenario: threat_scenario.to_string(),
            tools: test_case.tool_list(),
            test_type: test_case.test_type.clone().filter(|kind| !kind.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseQuery {
    pub scenario: String,
}

// ── Cascade output ─────────────────────────────────────────────────

/// A feature with every abuser story, threat scenario and test case below it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadingFeature {
    pub short_name: String,
    pub description: String,
    pub abuse_cases: Vec<AbuseRequest>,
}

impl CascadingFeature {
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.abuse_cases.iter().map(|story| story.scenarios.len()).sum()
    }

    #[must_use]
    pub fn test_case_count(&self) -> usize {
        self.abuse_cases
            .iter()
            .flat_map(|story| &story.scenarios)
            .map(|scenario| scenario.test_cases.len())
            .sum()
    }
}

// ── Accounts ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login reply. Older servers put the token at the top level, newer ones
/// inside `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    data: Option<TokenData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct TokenData {
    #[serde(default)]
    token: Option<String>,
}

impl LoginResponse {
    #[must_use]
    pub fn into_token(self) -> Option<String> {
        self.data
            .and_then(|data| data.token)
            .or(self.token)
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub email: String,
    pub old_password: String,
    pub new_password: String,
    pub verify_password: String,
}

// ── Deletes ────────────────────────────────────────────────────────

/// Delete body; each variant names the object and, except for projects, its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeleteRequest {
    Project { name: String },
    Feature { name: String, project: String },
    AbuserStory { name: String, feature: String },
    Scenario { name: String, abuser_story: String },
    TestCase { name: String, scenario: String },
}

impl DeleteRequest {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Project { name }
            | Self::Feature { name, .. }
            | Self::AbuserStory { name, .. }
            | Self::Scenario { name, .. }
            | Self::TestCase { name, .. } => name,
        }
    }

    #[must_use]
    pub const fn object_label(&self) -> &'static str {
        match self {
            Self::Project { .. } => "project",
            Self::Feature { .. } => "feature",
            Self::AbuserStory { .. } => "abuser story",
            Self::Scenario { .. } => "threat scenario",
            Self::TestCase { .. } => "test case",
        }
    }
}
