//! # pb-sync
//!
//! The two tree walks of the ThreatPlaybook client:
//!
//! - [`SyncPipeline`] submits a feature document top-down, one create call
//!   per node, and records one [`pb_core::NodeOutcome`] per node.
//! - [`CascadeReader`] reads a feature back, optionally with everything
//!   below it.

mod cascade;
mod error;
mod pipeline;

pub use cascade::{CascadeReader, DEFAULT_MAX_IN_FLIGHT, FeatureSummary, FeatureView};
pub use error::SyncError;
pub use pipeline::SyncPipeline;
