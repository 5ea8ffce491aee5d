//! Remote endpoints consumed by the client.

use std::fmt;

/// One ThreatPlaybook API endpoint. Paths are relative to the API prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ProjectRead,
    ProjectCreate,
    FeatureCreate,
    FeatureRead,
    AbuseCaseCreate,
    AbusesRead,
    ScenarioCreate,
    ScenarioRepoCreate,
    ScenariosRead,
    TestCreate,
    TestRead,
    Login,
    ChangePassword,
    DeleteProject,
    DeleteFeature,
    DeleteAbuserStory,
    DeleteScenario,
    DeleteTest,
}

impl Endpoint {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::ProjectRead => "/project/read",
            Self::ProjectCreate => "/project/create",
            Self::FeatureCreate => "/feature/create",
            Self::FeatureRead => "/feature/read",
            Self::AbuseCaseCreate => "/abuse-case/create",
            Self::AbusesRead => "/abuses/read",
            Self::ScenarioCreate => "/scenario/create",
            Self::ScenarioRepoCreate => "/scenario/repo/create",
            Self::ScenariosRead => "/scenarios/read",
            Self::TestCreate => "/test/create",
            Self::TestRead => "/test/read",
            Self::Login => "/login",
            Self::ChangePassword => "/change-password",
            Self::DeleteProject => "/delete/project",
            Self::DeleteFeature => "/delete/feature",
            Self::DeleteAbuserStory => "/delete/abuser-story",
            Self::DeleteScenario => "/delete/scenario",
            Self::DeleteTest => "/delete/test",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ProjectRead => "project-read",
            Self::ProjectCreate => "project-create",
            Self::FeatureCreate => "feature-create",
            Self::FeatureRead => "feature-read",
            Self::AbuseCaseCreate => "abuse-case-create",
            Self::AbusesRead => "abuses-read",
            Self::ScenarioCreate => "scenario-create",
            Self::ScenarioRepoCreate => "scenario-repo-create",
            Self::ScenariosRead => "scenarios-read",
            Self::TestCreate => "test-create",
            Self::TestRead => "test-read",
            Self::Login => "login",
            Self::ChangePassword => "change-password",
            Self::DeleteProject => "delete-project",
            Self::DeleteFeature => "delete-feature",
            Self::DeleteAbuserStory => "delete-abuser-story",
            Self::DeleteScenario => "delete-scenario",
            Self::DeleteTest => "delete-test",
        }
    }

    /// Whether the call creates a hierarchy node.
    #[must_use]
    pub const fn is_create(self) -> bool {
        matches!(
            self,
            Self::ProjectCreate
                | Self::FeatureCreate
                | Self::AbuseCaseCreate
                | Self::ScenarioCreate
                | Self::ScenarioRepoCreate
                | Self::TestCreate
        )
    }

    /// Whether the call sends the stored token.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        !matches!(self, Self::Login | Self::ChangePassword)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
