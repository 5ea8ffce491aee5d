use pb_core::FeatureDocument;

use crate::cli::GlobalFlags;
use crate::output::{output, structured};

/// Handle `playbook schema`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schemars::schema_for!(FeatureDocument);
    output(&schema, structured(flags.format))
}
