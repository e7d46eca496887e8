//! tabhero command-line entry point

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{Report, eyre};
use tabhero::cli::{self, args::Args};
use tracing_subscriber::EnvFilter;

/// Log filter variable, e.g. `TABHERO_LOG=tabhero=debug`
const LOG_ENV: &str = "TABHERO_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(args.verbose);

    cli::execute(args).await.map_err(into_report)
}

/// Rebuilds the anyhow chain as an eyre report so every cause gets its own section
fn into_report(err: anyhow::Error) -> Report {
    let mut causes = err.chain().rev().map(|cause| cause.to_string());
    let root = causes.next().unwrap_or_default();
    causes.fold(eyre!(root), |report, context| report.wrap_err(context))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
