// src/output/mod.rs
// =============================================================================
// This module is everything between a discovered entry and the terminal.
//
// Submodules:
// - tree: TreeLine, the prefix stack and the glyphs
// - printer: the one task that drains the output channel
// =============================================================================

mod printer;
mod tree;

pub use printer::Printer;
pub use tree::{Glyph, Prefix, TreeLine};
