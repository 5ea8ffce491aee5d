//! # pb-core
//!
//! Hierarchy document model for the ThreatPlaybook client.
//!
//! This crate provides the types shared by every other crate in the workspace:
//! - The declarative authoring schema (feature → abuser story → threat scenario
//!   → test case) parsed from YAML
//! - The wire schema: one request shape per remote endpoint, the response
//!   envelope, and the nested cascade output
//! - Per-node outcome records produced by the batch creation pipeline
//! - Document errors (parse failures and authoring errors)
//!
//! Mapping between the authoring and wire schemas is pure data transformation.

pub mod document;
pub mod errors;
pub mod outcome;
pub mod wire;

pub use document::{
    AbuserStoryDocument, FeatureDocument, ObjectType, ScenarioKind, ScenarioReference,
    TestCaseDocument, ThreatScenarioDocument, parse_tools,
};
pub use errors::DocumentError;
pub use outcome::{NodeLevel, NodeOutcome, OutcomeStatus, SyncReport};
