//! directive-watch CLI
//!
//! Runs one fetch → reconcile → publish cycle and exits. Meant to be
//! invoked periodically by an external scheduler.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use directive_watch::{
    error::Result,
    feed::RssPublisher,
    models::Config,
    pipeline::{self, RunOutcome},
    services::HttpFetcher,
    storage::LocalSnapshotStore,
};

/// directive-watch - CISA directives RSS generator
#[derive(Parser, Debug)]
#[command(
    name = "directive-watch",
    version,
    about = "Publishes an RSS feed of newly listed CISA directives"
)]
struct Cli {
    /// Path to the TOML configuration file (defaults are used if missing)
    #[arg(short, long, default_value = "directive-watch.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;
    config.validate()?;

    let fetcher = HttpFetcher::new(&config.source)?;
    let store = LocalSnapshotStore::new(&config.state.path);
    let publisher = RssPublisher::new(&config.feed.path);

    let report = pipeline::run_watch(&config, &fetcher, &store, &publisher).await?;

    match report.outcome {
        RunOutcome::Unchanged => log::info!("Done: {} directives, no changes", report.listed),
        _ => log::info!(
            "Done ({}): {} directives listed, {} published",
            report.outcome.label(),
            report.listed,
            report.published
        ),
    }

    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
