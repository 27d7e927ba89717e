// src/logging.rs
// =============================================================================
// Log setup. Logs go to stderr so stdout only ever carries the tree.
//
// RUST_LOG wins when it is set. Otherwise -v flags pick the level:
//   (none) -> warn   (failed subdirectories show up)
//   -v     -> info   (+ end of crawl summary)
//   -vv    -> debug  (+ every fetch)
// =============================================================================

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

pub fn init(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(verbosity)))
        .context("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
