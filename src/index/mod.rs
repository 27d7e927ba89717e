// src/index/mod.rs
// =============================================================================
// This module understands a single directory listing page.
//
// Submodules:
// - links: scans the HTML for anchors and drops the ones that are not entries
// - normalize: builds canonical URLs from parent URL + href
// - entry: the resolved entry (URL + is it a directory?)
//
// Nothing in here touches the network; the crawl module feeds it bytes.
// =============================================================================

mod entry;
mod links;
mod normalize;

pub use entry::CrawlEntry;
pub use links::extract_links;
pub use normalize::normalize;
