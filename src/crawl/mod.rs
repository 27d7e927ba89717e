// src/crawl/mod.rs
// =============================================================================
// This module handles the recursive crawl of an open directory.
//
// Submodules:
// - walker: one task per directory, fetch -> extract -> filter -> emit -> recurse
// - filter: which entries get a line, which get descended into
// - visited: the per-crawl set of claimed directory URLs
// - fetch: the shared HTTP client
// - report: per-directory outcomes and the final crawl report
// =============================================================================

mod fetch;
mod filter;
mod report;
mod visited;
mod walker;

pub use walker::crawl;
