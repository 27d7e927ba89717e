// src/crawl/report.rs
// =============================================================================
// What happened to every directory of a crawl.
//
// Each directory task returns a NodeOutcome carrying its children's outcomes,
// so the root outcome is the whole crawl as a tree. CrawlReport flattens that
// tree into the numbers we log at the end and, with --report, write as JSON.
// =============================================================================

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::error::CrawlError;

/// Counts for one successfully listed directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStats {
    /// Entries found on the page after extraction
    pub entries: usize,
    /// Lines this page sent to the printer
    pub emitted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeResult {
    Listed(NodeStats),
    /// Below --max-depth: listed by the parent but never fetched
    DepthLimited,
    Failed(CrawlError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeOutcome {
    pub url: String,
    pub depth: usize,
    pub result: NodeResult,
    /// Directories found here that were already claimed by another task
    pub already_visited: usize,
    pub children: Vec<NodeOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Fetch,
    Parse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

impl From<&CrawlError> for Failure {
    fn from(error: &CrawlError) -> Self {
        let (kind, message) = match error {
            CrawlError::Fetch { cause, .. } => (FailureKind::Fetch, cause.to_string()),
            CrawlError::Parse { cause, .. } => (FailureKind::Parse, cause.to_string()),
        };
        Failure {
            url: error.url().to_string(),
            kind,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub root: String,
    /// Directories fetched and listed successfully
    pub directories_listed: usize,
    /// Entries found across every listed directory, printed or not
    pub entries_found: usize,
    pub lines_emitted: usize,
    pub already_visited: usize,
    pub depth_limited: usize,
    pub max_depth_reached: usize,
    pub failures: Vec<Failure>,
    pub elapsed_ms: u64,
}

impl CrawlReport {
    pub fn from_outcome(root: &NodeOutcome, elapsed: Duration) -> Self {
        let mut report = CrawlReport {
            root: root.url.clone(),
            directories_listed: 0,
            entries_found: 0,
            lines_emitted: 0,
            already_visited: 0,
            depth_limited: 0,
            max_depth_reached: 0,
            failures: Vec::new(),
            elapsed_ms: elapsed.as_millis() as u64,
        };
        report.add(root);
        report
    }

    fn add(&mut self, node: &NodeOutcome) {
        self.already_visited += node.already_visited;

        match &node.result {
            NodeResult::Listed(stats) => {
                self.directories_listed += 1;
                self.entries_found += stats.entries;
                self.lines_emitted += stats.emitted;
                self.max_depth_reached = self.max_depth_reached.max(node.depth);
            }
            NodeResult::DepthLimited => self.depth_limited += 1,
            NodeResult::Failed(error) => self.failures.push(Failure::from(error)),
        }

        for child in &node.children {
            self.add(child);
        }
    }

    /// Writes the report as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("could not create report file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("could not write report to {}", path.display()))?;
        Ok(())
    }
}
