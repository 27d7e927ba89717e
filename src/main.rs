// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Start the printer task that owns stdout
// 3. Run the crawl, which feeds lines to the printer
// 4. Wait for the printer to drain, then exit
//
// Exit codes: 0 = crawl finished (even if some subdirectories failed),
// 2 = bad arguments or the root index could not be fetched/parsed.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the recursive walk
mod error; // src/error.rs - fetch / parse errors
mod index; // src/index/ - one listing page: links + URLs
mod logging; // src/logging.rs - tracing setup
mod options; // src/options.rs - resolved configuration
mod output; // src/output/ - tree lines and the printer

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse_from() method
use cli::Cli;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    // clap prints usage and exits with status 2 when -u is missing
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));

    logging::init(cli.verbose)?;

    let report_path = cli.report.clone();
    let options = Arc::new(cli.into_options()?);

    if options.banner {
        cli::print_banner();
    }

    // Many producers (one per directory task), exactly one consumer
    let (lines, receiver) = mpsc::unbounded_channel();
    let printer = output::Printer::new(options.display);
    let printing =
        tokio::task::spawn_blocking(move || printer.drain(receiver, std::io::stdout().lock()));

    // crawl() returns only after every directory task finished and the last
    // sender is gone, so the printer is guaranteed to see every line
    let crawled = crawl::crawl(options.clone(), lines).await;

    let printed = printing
        .await
        .context("printer task failed")?
        .context("could not write to stdout")?;

    let report = crawled?;

    info!(
        root = %report.root,
        directories = report.directories_listed,
        entries = report.entries_found,
        lines = printed,
        failures = report.failures.len(),
        elapsed_ms = report.elapsed_ms,
        "crawl finished"
    );

    if let Some(path) = report_path {
        report.save(&path)?;
        info!(path = %path.display(), "report written");
    }

    Ok(0)
}
