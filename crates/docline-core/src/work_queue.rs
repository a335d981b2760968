//! Lock-free work queue for distributing documents across parallel workers

use std::sync::atomic::{AtomicUsize, Ordering};

/// Lock-free work queue handing out items in order.
///
/// Workers call [`next()`](WorkQueue::next) to claim the next item together
/// with its position. Items are claimed strictly in order, so at any moment
/// the in-flight positions span at most one item per worker.
pub struct WorkQueue<S> {
    items: Vec<S>,
    cursor: AtomicUsize,
}

impl<S> WorkQueue<S> {
    pub fn new(items: Vec<S>) -> Self {
        log::debug!("{} items in work queue", items.len());
        Self {
            items,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Claim the next item and its index (lock-free)
    pub fn next(&self) -> Option<(usize, &S)> {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.items.get(i).map(|item| (i, item))
    }

    /// Total items in queue
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Items never claimed (e.g. after shutdown stopped the workers)
    pub fn unclaimed(&self) -> usize {
        self.total()
            .saturating_sub(self.cursor.load(Ordering::Relaxed))
    }
}
