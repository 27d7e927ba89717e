// src/crawl/filter.rs
// =============================================================================
// Decides, for each entry of a listing, whether it gets a line and whether
// the crawl descends into it.
//
// Directories
//   Listing                      -> printed
//   Directories / DirsAndFiles   -> printed if no matchers, or one matches
//   Files                        -> not printed
//   (every mode descends)
//
// Files
//   Directories                  -> dropped
//   otherwise, first rule that applies:
//     matchers configured        -> printed if one matches (extensions ignored)
//     extensions configured      -> printed if the extension is allowed
//     nothing configured         -> printed
//
// Matching is case-insensitive everywhere. Matchers are substrings of the
// whole URL; extensions are compared to everything after the last `.` of the
// last path segment.
// =============================================================================

use crate::index::CrawlEntry;
use crate::options::{CrawlOptions, GlyphRule, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub emit: bool,
    pub descend: bool,
}

impl Decision {
    const SKIP: Decision = Decision {
        emit: false,
        descend: false,
    };

    fn file(emit: bool) -> Decision {
        Decision {
            emit,
            descend: false,
        }
    }

    fn directory(emit: bool) -> Decision {
        Decision {
            emit,
            descend: true,
        }
    }
}

pub fn decide(entry: &CrawlEntry, options: &CrawlOptions) -> Decision {
    if entry.is_dir {
        return Decision::directory(match options.mode {
            Mode::Listing => true,
            Mode::Directories | Mode::DirectoriesAndFiles => {
                options.matchers.is_empty() || matches_any(&entry.url, &options.matchers)
            }
            Mode::Files => false,
        });
    }

    if options.mode == Mode::Directories {
        return Decision::SKIP;
    }

    if !options.matchers.is_empty() {
        return Decision::file(matches_any(&entry.url, &options.matchers));
    }

    if !options.extensions.is_empty() {
        let allowed = extension_of(&entry.url)
            .map(|ext| options.extensions.iter().any(|allowed| *allowed == ext))
            .unwrap_or(false);
        return Decision::file(allowed);
    }

    Decision::file(true)
}

/// True when any matcher is a case-insensitive substring of the URL
pub fn matches_any(url: &str, matchers: &[String]) -> bool {
    let url = url.to_lowercase();
    matchers.iter().any(|m| url.contains(&m.to_lowercase()))
}

/// Lowercase extension of the last path segment, without the dot
///
///   "https://h/photo.JPG"      -> Some("jpg")
///   "https://h/a.tar.gz?x=1"   -> Some("gz")
///   "https://h/v1.2/README"    -> None
pub fn extension_of(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = name.rsplit_once('.')?;

    if ext.is_empty() {
        return None;
    }

    Some(ext.to_lowercase())
}

/// Index of the entry that gets the terminal glyph, if any
///
/// - Emitted: the last entry that will actually be printed
/// - Listing: the last entry of the listing, but only if it is printed
pub fn terminal_index(decisions: &[Decision], rule: GlyphRule) -> Option<usize> {
    match rule {
        GlyphRule::Emitted => decisions.iter().rposition(|d| d.emit),
        GlyphRule::Listing => decisions.len().checked_sub(1),
    }
}
