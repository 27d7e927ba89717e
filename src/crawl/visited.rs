// src/crawl/visited.rs
// =============================================================================
// The set of directory URLs a crawl has already claimed.
//
// One VisitedSet lives for one crawl. Every directory task holds a handle to
// the same set (cloning the handle clones an Arc, not the set). A URL goes in
// before its fetch is issued, so two siblings that discover the same
// directory at the same moment cannot both fetch it: whichever takes the lock
// first wins, the other sees `false` from insert() and backs off.
//
// The set only grows. Nothing is ever removed, even when a fetch fails; a
// failed directory stays failed for the rest of the run.
// =============================================================================

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    urls: Arc<Mutex<HashSet<String>>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` without asking whether it was there (used for the root)
    pub fn mark_visited(&self, url: &str) {
        self.lock().insert(url.to_string());
    }

    /// The "has it been visited?" check and the mark, under one lock
    ///
    /// Returns true when the caller is the first to claim `url` and should
    /// go on to fetch it.
    pub fn insert(&self, url: &str) -> bool {
        self.lock().insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // A panic while holding the lock cannot leave a HashSet half-inserted in
    // a way that matters to us, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Arc<Mutex<...>> and not a global?
//    - Arc lets many tasks own the same set; the set is freed when the last
//      handle goes away, i.e. when the crawl is over
//    - Mutex makes every read and write exclusive
//    - A global would outlive the crawl and leak between tests
//
// 2. Why std::sync::Mutex inside async code?
//    - We never .await while holding the lock
//    - For short critical sections the std mutex is the usual choice;
//      tokio::sync::Mutex is for locks held across .await points
//
// 3. Why is there no separate has_visited()?
//    - Checking and then marking in two calls leaves a gap where another
//      task can run: both see "not visited", both fetch
//    - HashSet::insert already returns whether the value was new, so doing
//      it under one lock closes the gap
// -----------------------------------------------------------------------------
