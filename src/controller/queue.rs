//! Serial transition queue: at most one prepared animation in flight.

use std::collections::VecDeque;

use crate::animation::PlayableHandle;

/// A prepared, not yet started transition into `target`.
pub(crate) struct QueueEntry {
    pub(crate) target: String,
    pub(crate) animation: Box<dyn PlayableHandle>,
}

/// FIFO of prepared transitions plus the single-flight flag.
///
/// Pure bookkeeping: the controller holds this behind its lock and starts
/// whatever [`pop_ready`](Self::pop_ready) hands back after unlocking.
#[derive(Default)]
pub(crate) struct TransitionQueue {
    pending: VecDeque<QueueEntry>,
    current: Option<String>,
    transitioning: bool,
}

impl TransitionQueue {
    /// State the next enqueued transition starts from: the newest queued
    /// target, else the current state, else `default`.
    pub(crate) fn next_from<'a>(&'a self, default: &'a str) -> &'a str {
        self.pending
            .back()
            .map(|e| e.target.as_str())
            .or(self.current.as_deref())
            .unwrap_or(default)
    }

    /// Target the controller will end up in once everything drains, if a
    /// transition is queued or running.
    pub(crate) fn pending_target(&self) -> Option<&str> {
        match self.pending.back() {
            Some(entry) => Some(&entry.target),
            None if self.transitioning => self.current.as_deref(),
            None => None,
        }
    }

    pub(crate) fn push(&mut self, entry: QueueEntry) {
        self.pending.push_back(entry);
    }

    /// Take the head when nothing is running, marking it as running.
    pub(crate) fn pop_ready(&mut self) -> Option<QueueEntry> {
        if self.transitioning {
            return None;
        }
        let entry = self.pending.pop_front()?;
        self.transitioning = true;
        self.current = Some(entry.target.clone());
        Some(entry)
    }

    /// The running transition finished.
    pub(crate) fn complete(&mut self) {
        self.transitioning = false;
    }

    /// Drop every queued entry; the running one is untouched.
    pub(crate) fn clear(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub(crate) fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub(crate) fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
