// src/crawl/walker.rs
// =============================================================================
// This module walks an open directory listing recursively.
//
// How it works:
// 1. Fetch the index page of one directory
// 2. Extract its entries and resolve them to canonical URLs
// 3. Decide per entry: print a line? descend into it?
// 4. Send the lines to the printer, in listing order
// 5. Spawn one task per subdirectory and wait for all of them
//
// Every directory is its own tokio task, so siblings are fetched in parallel
// on the multi-threaded runtime. Lines from different subtrees can therefore
// interleave; lines of one directory keep their listing order.
//
// Safety rails:
// - Only entries below the directory being listed count, so parents,
//   siblings and other hosts are never printed or fetched from here
// - A directory URL is claimed in the VisitedSet before its task is spawned,
//   so self-linking or looping listings terminate and no URL is fetched twice
// - A semaphore bounds how many fetches are in flight
// - --max-depth stops descending below a given depth
//
// A directory that fails to fetch or parse is logged and reported; its
// siblings carry on. Only a failure of the root aborts the crawl.
// =============================================================================

use std::sync::Arc;
use std::time::Instant;

use futures::future::{join_all, BoxFuture, FutureExt};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::fetch::Fetcher;
use super::filter::{self, Decision};
use super::report::{CrawlReport, NodeOutcome, NodeResult, NodeStats};
use super::visited::VisitedSet;
use crate::error::{CrawlError, FetchError};
use crate::index::{self, CrawlEntry};
use crate::options::CrawlOptions;
use crate::output::{Glyph, Prefix, TreeLine};

/// Crawls the listing at `options.root` and everything below it
///
/// Lines go to `lines` as they are discovered. The sender is dropped before
/// this function returns, after every directory task has finished, so the
/// receiving printer sees the channel close only once the crawl is complete.
///
/// Returns Err only when the root itself cannot be fetched or parsed.
pub async fn crawl(
    options: Arc<CrawlOptions>,
    lines: UnboundedSender<TreeLine>,
) -> Result<CrawlReport, CrawlError> {
    let started = Instant::now();
    let root = options.root.clone();

    let fetcher =
        Fetcher::new(options.limits.timeout).map_err(|e| CrawlError::fetch(&root, e))?;

    let visited = VisitedSet::new();
    visited.mark_visited(&root);

    let walker = Arc::new(Walker {
        permits: Semaphore::new(options.limits.concurrency.max(1)),
        options,
        fetcher,
        visited,
        lines,
    });

    let outcome = walker
        .clone()
        .visit(Directory {
            url: root,
            prefix: Prefix::default(),
        })
        .await;

    debug!(claimed = walker.visited.len(), "all directory tasks finished");
    drop(walker);

    if let NodeResult::Failed(error) = &outcome.result {
        return Err(error.clone());
    }

    Ok(CrawlReport::from_outcome(&outcome, started.elapsed()))
}

// Shared by every directory task of one crawl
struct Walker {
    options: Arc<CrawlOptions>,
    fetcher: Fetcher,
    visited: VisitedSet,
    permits: Semaphore,
    lines: UnboundedSender<TreeLine>,
}

// One directory to list
struct Directory {
    url: String,
    // Glyph context of this directory's entries; its length is the depth
    prefix: Prefix,
}

impl Walker {
    // Boxed because the future spawns copies of itself
    fn visit(self: Arc<Self>, dir: Directory) -> BoxFuture<'static, NodeOutcome> {
        async move { self.list(dir).await }.boxed()
    }

    async fn list(self: Arc<Self>, dir: Directory) -> NodeOutcome {
        let depth = dir.prefix.depth();
        let mut outcome = NodeOutcome {
            url: dir.url.clone(),
            depth,
            result: NodeResult::Listed(NodeStats::default()),
            already_visited: 0,
            children: Vec::new(),
        };

        let entries = match self.read_entries(&dir.url, depth).await {
            Ok(entries) => entries,
            Err(error) => {
                // The root's error is returned to the caller, which reports it
                if depth > 0 {
                    warn!(url = %dir.url, %error, "skipping directory");
                }
                outcome.result = NodeResult::Failed(error);
                return outcome;
            }
        };

        let decisions: Vec<Decision> = entries
            .iter()
            .map(|entry| filter::decide(entry, &self.options))
            .collect();
        let terminal = filter::terminal_index(&decisions, self.options.glyphs);

        let mut emitted = 0;
        let mut tasks = Vec::new();

        for (index, (entry, decision)) in entries.iter().zip(&decisions).enumerate() {
            let is_last = terminal == Some(index);

            if decision.emit {
                self.emit(TreeLine::new(&dir.prefix, Glyph::for_entry(is_last), &entry.url));
                emitted += 1;
            }

            if !decision.descend {
                continue;
            }

            // A hidden directory after the terminal line has no sibling
            // below it either, so its children get blank indentation
            let closes_branch = terminal.map_or(true, |terminal| index >= terminal);

            let child = Directory {
                url: entry.url.clone(),
                prefix: dir.prefix.child(closes_branch),
            };

            if !self.within_depth(depth + 1) {
                outcome.children.push(NodeOutcome {
                    url: child.url,
                    depth: depth + 1,
                    result: NodeResult::DepthLimited,
                    already_visited: 0,
                    children: Vec::new(),
                });
                continue;
            }

            // Claim before spawning: a second claim of the same URL loses
            if !self.visited.insert(&child.url) {
                debug!(url = %child.url, "already visited");
                outcome.already_visited += 1;
                continue;
            }

            tasks.push(tokio::spawn(self.clone().visit(child)));
        }

        outcome.result = NodeResult::Listed(NodeStats {
            entries: entries.len(),
            emitted,
        });

        for joined in join_all(tasks).await {
            match joined {
                Ok(child) => outcome.children.push(child),
                Err(error) => warn!(%error, "directory task did not finish"),
            }
        }

        outcome
    }

    // Fetches and parses one index page into resolved entries
    async fn read_entries(&self, url: &str, depth: usize) -> Result<Vec<CrawlEntry>, CrawlError> {
        let body = {
            let _permit = self.permits.acquire().await.map_err(|_| {
                CrawlError::fetch(url, FetchError::Request("fetch pool closed".to_string()))
            })?;

            debug!(%url, depth, "fetching index");
            self.fetcher
                .get(url)
                .await
                .map_err(|e| CrawlError::fetch(url, e))?
        };

        let anchors = index::extract_links(&body).map_err(|e| CrawlError::parse(url, e))?;

        Ok(anchors
            .into_iter()
            .filter_map(|anchor| CrawlEntry::resolve(url, anchor))
            .collect())
    }

    fn within_depth(&self, depth: usize) -> bool {
        self.options
            .limits
            .max_depth
            .map_or(true, |max| depth <= max)
    }

    fn emit(&self, line: TreeLine) {
        if self.lines.send(line).is_err() {
            debug!("printer is gone, dropping line");
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does visit() return a BoxFuture?
//    - An async fn that (indirectly) calls itself would have an infinitely
//      large future type
//    - Boxing gives the recursive call a fixed size: a pointer
//
// 2. Why `self: Arc<Self>`?
//    - tokio::spawn needs a 'static future, it cannot borrow from the parent
//    - Each child gets its own Arc clone of the shared Walker
//
// 3. Why is the semaphore permit dropped before spawning children?
//    - The permit lives only inside the block around the fetch
//    - If a parent kept its permit while waiting on its children, a deep
//      enough tree would use up every permit and wait forever
//
// 4. What does join_all do?
//    - Waits until every JoinHandle finished
//    - A child that panicked shows up as Err(JoinError) instead of taking
//      the whole crawl down
// -----------------------------------------------------------------------------
