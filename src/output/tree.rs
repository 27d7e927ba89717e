// src/output/tree.rs
// =============================================================================
// Tree glyphs and the lines the crawl produces.
//
// A line looks like:
//
//   │       └── https://example.test/a/b/c.txt
//   ^^^^^^^^ ^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//   prefix   glyph payload
//
// The prefix has one 4-column cell per ancestor: `│   ` while that ancestor
// still has siblings below it, blank once it was the last child. Each
// directory task carries its own Prefix and hands an extended copy to every
// child it spawns.
// =============================================================================

use std::fmt;

pub const BRANCH: &str = "├── ";
pub const LAST_BRANCH: &str = "└── ";
pub const CONTINUATION: &str = "│   ";
pub const BLANK: &str = "    ";

/// "Was this ancestor the last child?" for every ancestor, root first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefix(Vec<bool>);

impl Prefix {
    /// The prefix for the children of an entry at this level
    pub fn child(&self, entry_is_last: bool) -> Prefix {
        let mut ancestors = self.0.clone();
        ancestors.push(entry_is_last);
        Prefix(ancestors)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|&was_last| if was_last { BLANK } else { CONTINUATION })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Branch,
    LastBranch,
}

impl Glyph {
    pub fn for_entry(is_last: bool) -> Glyph {
        if is_last {
            Glyph::LastBranch
        } else {
            Glyph::Branch
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Glyph::Branch => BRANCH,
            Glyph::LastBranch => LAST_BRANCH,
        }
    }
}

/// One fully formatted output record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub prefix: String,
    pub glyph: Glyph,
    /// Absolute URL of the entry
    pub payload: String,
}

impl TreeLine {
    pub fn new(prefix: &Prefix, glyph: Glyph, payload: &str) -> Self {
        TreeLine {
            prefix: prefix.render(),
            glyph,
            payload: payload.to_string(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.payload.ends_with('/')
    }

    /// The line without any glyph or indentation
    pub fn flat(&self) -> &str {
        &self.payload
    }
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.glyph.as_str(), self.payload)
    }
}
