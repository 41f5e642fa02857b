//! Single-shot deferred action queue.
//!
//! Visual updates that must not interfere with the event that triggered
//! them (marking a row selected while the same key press is still being
//! handled) are pushed here and drained exactly once per event-loop
//! iteration: after the triggering event's handling completes, before the
//! next frame is drawn. There is no cancellation; every queued action
//! runs exactly once.

use std::collections::VecDeque;

use crate::events::Action;

#[derive(Debug, Default)]
pub struct DeferredQueue {
    queue: VecDeque<Action>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Queue an action to run after the current event finishes.
    pub fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    /// Take all queued actions in FIFO order, leaving the queue empty.
    ///
    /// Actions queued while the drained batch is being applied belong to
    /// the next iteration.
    pub fn drain(&mut self) -> Vec<Action> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut deferred = DeferredQueue::new();
        deferred.push(Action::MarkSelected(1));
        deferred.push(Action::InsertQuote);

        let drained = deferred.drain();
        assert!(matches!(drained[0], Action::MarkSelected(1)));
        assert!(matches!(drained[1], Action::InsertQuote));
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut deferred = DeferredQueue::new();
        deferred.push(Action::MarkSelected(0));

        assert_eq!(deferred.drain().len(), 1);
        assert!(deferred.is_empty());
        assert!(deferred.drain().is_empty());
    }
}
