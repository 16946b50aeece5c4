//! Incremental batch execution
//!
//! Turns a large unit-of-work list into bounded per-step chunks with a
//! yield point between them. The host loop pulls one step at a time; over
//! `N` items with batch size `B` exactly `ceil(N/B)` steps run, and the
//! total observable side effects are identical to doing everything in one
//! step — batching changes only when work completes, never the result.

/// Pull-based incremental executor over an owned work list.
///
/// No implicit continuation state: the cursor is the whole of the
/// scheduler's progress, advanced only by `process_next`.
pub struct BatchScheduler<T> {
    items: Vec<T>,
    batch_size: usize,
    cursor: usize,
}

impl<T> BatchScheduler<T> {
    /// A batch size of 0 is a precondition violation; it is clamped to 1
    /// so every step still makes progress.
    pub fn new(items: Vec<T>, batch_size: usize) -> Self {
        Self {
            items,
            batch_size: batch_size.max(1),
            cursor: 0,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Items not yet processed.
    pub fn remaining(&self) -> usize {
        self.items.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor == self.items.len()
    }

    /// Total steps this workload takes, `ceil(N/B)`.
    pub fn steps_total(&self) -> usize {
        self.items.len().div_ceil(self.batch_size)
    }

    /// Process up to one batch of items, then yield. Returns `true` while
    /// work remains afterwards.
    pub fn process_next<F>(&mut self, mut work: F) -> bool
    where
        F: FnMut(&T),
    {
        let end = (self.cursor + self.batch_size).min(self.items.len());
        for item in &self.items[self.cursor..end] {
            work(item);
        }
        self.cursor = end;
        !self.is_finished()
    }

    /// Run every remaining batch back to back. Returns the number of steps
    /// performed; mostly useful when the host has no frame budget to honor.
    pub fn drain_all<F>(&mut self, mut work: F) -> usize
    where
        F: FnMut(&T),
    {
        let mut steps = 0;
        while !self.is_finished() {
            self.process_next(&mut work);
            steps += 1;
        }
        steps
    }
}
