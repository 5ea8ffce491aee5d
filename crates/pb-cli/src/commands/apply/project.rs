use anyhow::bail;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(name: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let reply = ctx.client.create_project(name).await?;
    if !reply.is_success() {
        bail!(
            "unable to create project '{name}' (HTTP {}): {}",
            reply.status,
            reply.error_message()
        );
    }

    output(&json!({"result": "created", "project": name}), flags.format)
}
