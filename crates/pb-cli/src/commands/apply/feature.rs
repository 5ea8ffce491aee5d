use anyhow::{Context, bail};
use pb_core::FeatureDocument;
use pb_sync::SyncPipeline;

use crate::cli::subcommands::ApplyFeatureArgs;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_table;
use crate::progress::Progress;

/// Submit a feature document. Child failures are reported; only a failed
/// feature node makes the command fail.
pub async fn run(args: &ApplyFeatureArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let document = FeatureDocument::from_path(&args.file)
        .with_context(|| format!("invalid feature document {}", args.file.display()))?;

    let spinner = Progress::spinner(&format!(
        "applying feature '{}' ({} nodes)",
        document.name,
        document.node_count()
    ));
    let report = match SyncPipeline::new(&ctx.client).run(&document, &args.project).await {
        Ok(report) => {
            spinner.finish_clear();
            report
        }
        Err(error) => {
            spinner.finish_err("apply failed");
            return Err(error).context(format!("failed to apply feature '{}'", document.name));
        }
    };

    if !flags.quiet {
        for failure in report.failures() {
            eprintln!("{failure}");
        }
    }

    output_table(&report, &report.outcomes, flags.format)?;

    if !report.feature_created() {
        bail!(
            "feature '{}' was not created in project '{}'",
            report.feature,
            report.project
        );
    }
    Ok(())
}
