mod args;
mod error;
mod ingest;
mod layout;
mod plot;
mod report_builder;
mod runner;

use crate::args::{defaults::DEFAULT_LOG_LEVEL, TickstatArgs};
use crate::error::TickstatError;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), TickstatError> {
    let args = TickstatArgs::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .init();

    info!("Starting tickstat...");
    runner::run(args)?;
    info!("Finished.");
    Ok(())
}
