use anyhow::Context;
use pb_sync::{CascadeReader, FeatureView};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GetFeatureArgs;
use crate::context::AppContext;
use crate::output::{output, output_table, structured};
use crate::progress::Progress;

pub async fn run(args: &GetFeatureArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spinner = Progress::spinner(&format!("reading feature '{}'", args.short_name));
    let view = CascadeReader::new(&ctx.client)
        .with_max_in_flight(ctx.config.client.max_in_flight)
        .read(&args.short_name, &args.project, args.cascade)
        .await;
    spinner.finish_clear();

    match view.with_context(|| format!("failed to read feature '{}'", args.short_name))? {
        FeatureView::Summary(summary) => {
            output_table(&summary, std::slice::from_ref(&summary), flags.format)
        }
        FeatureView::Cascade(feature) => output(&feature, structured(flags.format)),
    }
}
