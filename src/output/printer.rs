// src/output/printer.rs
// =============================================================================
// The single consumer of the output channel.
//
// Every directory task sends TreeLines into one unbounded channel; exactly one
// Printer owns the receiving end and writes them out, so two tasks can never
// interleave halfway through a line. The printer stops when the channel
// closes, which happens once the crawl dropped its last sender.
//
// Writing to stdout blocks, so drain() is a plain function meant for
// tokio::task::spawn_blocking, not an async task on the runtime workers.
// =============================================================================

use std::io::{self, Write};

use tokio::sync::mpsc::UnboundedReceiver;

use super::tree::TreeLine;
use crate::options::DisplayOptions;

#[derive(Debug, Clone, Copy)]
pub struct Printer {
    display: DisplayOptions,
}

impl Printer {
    pub fn new(display: DisplayOptions) -> Self {
        Printer { display }
    }

    /// Renders a line, or None when `-of` hides it
    pub fn format(&self, line: &TreeLine) -> Option<String> {
        if self.display.only_files && line.is_dir() {
            return None;
        }

        if self.display.tree {
            Some(line.to_string())
        } else {
            Some(line.flat().to_string())
        }
    }

    /// Drains the channel into `out` until every sender is gone
    ///
    /// Returns how many lines were written. Must not be called from inside
    /// an async task: it parks the thread while waiting for lines.
    pub fn drain<W: Write>(
        self,
        mut lines: UnboundedReceiver<TreeLine>,
        mut out: W,
    ) -> io::Result<usize> {
        let mut written = 0;

        while let Some(line) = lines.blocking_recv() {
            if let Some(text) = self.format(&line) {
                writeln!(out, "{}", text)?;
                out.flush()?;
                written += 1;
            }
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tree::{Glyph, Prefix};
    use tokio::sync::mpsc;

    fn display(tree: bool, only_files: bool) -> DisplayOptions {
        DisplayOptions { tree, only_files }
    }

    fn scenario_lines() -> Vec<TreeLine> {
        let root = Prefix::default();
        vec![
            TreeLine::new(&root, Glyph::Branch, "https://example.test/a/"),
            TreeLine::new(&root.child(false), Glyph::LastBranch, "https://example.test/a/c.txt"),
            TreeLine::new(&root, Glyph::LastBranch, "https://example.test/b.txt"),
        ]
    }

    fn drain_all(display: DisplayOptions, lines: Vec<TreeLine>) -> (usize, String) {
        let (tx, rx) = mpsc::unbounded_channel();
        for line in lines {
            tx.send(line).unwrap();
        }
        drop(tx);

        let mut out = Vec::new();
        let written = Printer::new(display).drain(rx, &mut out).unwrap();
        (written, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_tree_output() {
        let (written, out) = drain_all(display(true, false), scenario_lines());
        assert_eq!(written, 3);
        assert_eq!(
            out,
            "├── https://example.test/a/\n│   └── https://example.test/a/c.txt\n└── https://example.test/b.txt\n"
        );
    }

    #[test]
    fn test_flat_output_strips_glyphs_and_indent() {
        let (_, out) = drain_all(display(false, false), scenario_lines());
        assert_eq!(
            out,
            "https://example.test/a/\nhttps://example.test/a/c.txt\nhttps://example.test/b.txt\n"
        );
    }

    #[test]
    fn test_only_files_drops_directory_lines() {
        let (written, out) = drain_all(display(false, true), scenario_lines());
        assert_eq!(written, 2);
        assert_eq!(out, "https://example.test/a/c.txt\nhttps://example.test/b.txt\n");
    }

    #[tokio::test]
    async fn test_drains_on_a_blocking_thread_while_lines_arrive() {
        let (tx, rx) = mpsc::unbounded_channel();
        let printing = tokio::task::spawn_blocking(move || {
            let mut out = Vec::new();
            let written = Printer::new(display(false, false)).drain(rx, &mut out)?;
            Ok::<_, io::Error>((written, out))
        });

        for line in scenario_lines() {
            tx.send(line).unwrap();
            tokio::task::yield_now().await;
        }
        drop(tx);

        let (written, out) = printing.await.unwrap().unwrap();
        assert_eq!(written, 3);
        assert!(String::from_utf8(out).unwrap().ends_with("https://example.test/b.txt\n"));
    }

    #[test]
    fn test_closed_empty_channel_finishes() {
        let (written, out) = drain_all(display(true, false), Vec::new());
        assert_eq!(written, 0);
        assert!(out.is_empty());
    }
}
