// src/options.rs
// =============================================================================
// The crawl configuration, resolved once from the command line.
//
// CrawlOptions is built in cli.rs and never changes afterwards. The walker
// shares it between every directory task behind an Arc.
//
// Two enums replace the boolean soup of -d / -f / --listing-order-glyphs:
// - Mode: which kinds of entries get a line
// - GlyphRule: which entry of a listing gets the terminal `└── ` glyph
// =============================================================================

use std::time::Duration;

/// Which entries produce output lines
///
/// Recursion into directories happens in every mode; the mode only decides
/// what is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No -d / -f: every directory is printed, files go through the filters
    Listing,
    /// -d: directories printed (subject to matchers), files never
    Directories,
    /// -f: directories never printed, files go through the filters
    Files,
    /// -d -f: directories printed subject to matchers, files through the filters
    DirectoriesAndFiles,
}

impl Mode {
    pub fn from_flags(directories: bool, files: bool) -> Self {
        match (directories, files) {
            (false, false) => Mode::Listing,
            (true, false) => Mode::Directories,
            (false, true) => Mode::Files,
            (true, true) => Mode::DirectoriesAndFiles,
        }
    }
}

/// How the terminal glyph is assigned inside one listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphRule {
    /// The last entry that is actually printed ends the branch
    Emitted,
    /// The last entry of the listing ends the branch, printed or not.
    /// When that entry is filtered out, no line of the listing gets `└── `.
    Listing,
}

/// How the printer renders lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Tree glyphs and indentation (`-t`), flat URLs otherwise
    pub tree: bool,
    /// Drop every line whose URL ends in `/` (`-of`)
    pub only_files: bool,
}

/// Bounds on how much work one crawl may do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest directory that is still fetched; the root is depth 0
    pub max_depth: Option<usize>,
    /// Fetches allowed in flight at once
    pub concurrency: usize,
    pub timeout: Option<Duration>,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_depth: None,
            concurrency: 16,
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Canonical root URL, always ending in `/`
    pub root: String,
    /// Lowercase extensions without the leading dot; empty means no filter
    pub extensions: Vec<String>,
    /// Lowercase substrings; empty means no filter
    pub matchers: Vec<String>,
    pub mode: Mode,
    pub glyphs: GlyphRule,
    pub display: DisplayOptions,
    pub limits: Limits,
    pub banner: bool,
}

impl CrawlOptions {
    /// Options with every filter off, the defaults of the CLI
    pub fn new(root: &str) -> Self {
        CrawlOptions {
            root: root_url(root),
            extensions: Vec::new(),
            matchers: Vec::new(),
            mode: Mode::Listing,
            glyphs: GlyphRule::Emitted,
            display: DisplayOptions {
                tree: true,
                only_files: false,
            },
            limits: Limits::default(),
            banner: true,
        }
    }
}

/// Turns whatever the user typed into the URL the crawl starts from
///
/// - `example.test/pub` -> `https://example.test/pub/`
/// - `http://example.test` -> `http://example.test/`
///
/// The trailing slash matters: child URLs are built by appending hrefs.
pub fn root_url(raw: &str) -> String {
    let raw = raw.trim();
    let mut url = if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    if !url.ends_with('/') {
        url.push('/');
    }

    crate::index::normalize(&url)
}

/// Splits a comma separated flag value into lowercase items
///
/// Empty items are dropped, so `-e "jpg,,png,"` is the same as `-e jpg,png`.
/// A leading dot is stripped when `strip_dot` is set (`-e .jpg` works).
pub fn split_list(raw: &str, strip_dot: bool) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim())
        .map(|item| if strip_dot { item.trim_start_matches('.') } else { item })
        .filter(|item| !item.is_empty())
        .map(|item| item.to_lowercase())
        .collect()
}
