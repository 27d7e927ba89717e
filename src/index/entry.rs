// src/index/entry.rs
// =============================================================================
// CrawlEntry: one href of a listing, resolved against the page it was on.
// =============================================================================

use super::links::Anchor;
use super::normalize::resolve;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlEntry {
    /// Canonical absolute URL
    pub url: String,
    /// Directories are exactly the URLs ending in `/`
    pub is_dir: bool,
}

impl CrawlEntry {
    /// Resolves an anchor found on the page at `parent`
    ///
    /// Returns None unless the URL lies strictly below `parent`. That drops
    /// other hosts, the page itself, its ancestors and its siblings (e.g. a
    /// root-relative `/other/` on `/pub/`).
    pub fn resolve(parent: &str, anchor: Anchor) -> Option<CrawlEntry> {
        let url = resolve(parent, &anchor.href);

        if url.len() <= parent.len() || !url.starts_with(parent) {
            return None;
        }

        Some(CrawlEntry::new(url))
    }

    pub fn new(url: String) -> CrawlEntry {
        CrawlEntry {
            is_dir: url.ends_with('/'),
            url,
        }
    }
}
