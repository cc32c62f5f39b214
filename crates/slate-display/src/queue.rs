//! FIFO buffer of packed words awaiting interpretation.

use std::collections::VecDeque;

use slate_proto::PackedWord;

/// Admission policy applied when a word is pushed.
///
/// `Unbounded` matches the wire protocol's baseline contract: the queue grows
/// without limit and the producer is trusted. The bounded policies are the
/// hardening option for untrusted producers; `cap` bounds `len()` and the
/// policy picks which word loses when the cap is hit. A zero cap is
/// normalized to 1 when the queue is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BacklogPolicy {
    Unbounded,
    /// Evict the oldest queued word to admit the new one.
    DropOldest { cap: usize },
    /// Discard the incoming word.
    DropNewest { cap: usize },
    /// Refuse the incoming word; the caller sees the backpressure.
    Reject { cap: usize },
}

/// What happened to one pushed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Appended to the back of the queue.
    Queued,
    /// Appended after evicting the oldest queued word.
    EvictedOldest,
    /// Discarded under [`BacklogPolicy::DropNewest`].
    DroppedNewest,
    /// Refused under [`BacklogPolicy::Reject`].
    Rejected,
}

impl PushOutcome {
    /// True when the pushed word is now in the queue.
    pub fn is_queued(self) -> bool {
        matches!(self, PushOutcome::Queued | PushOutcome::EvictedOldest)
    }
}

/// FIFO of encoded instructions, owned by one display instance.
///
/// Entries are never reordered or duplicated. Growth never drops existing
/// entries; the bounded policies act only at the capacity boundary and only
/// on the word the policy names.
#[derive(Debug, Clone)]
pub struct CommandQueue {
    words: VecDeque<PackedWord>,
    policy: BacklogPolicy,
    dropped: u64,
}

impl CommandQueue {
    /// Initial backing capacity. Under `Unbounded` the queue grows past it on
    /// demand.
    pub const INITIAL_CAPACITY: usize = 256;

    pub fn new(policy: BacklogPolicy) -> Self {
        // Bounded caps normalize to at least 1; push outcomes assume a
        // nonzero bound.
        let policy = match policy {
            BacklogPolicy::Unbounded => BacklogPolicy::Unbounded,
            BacklogPolicy::DropOldest { cap } => BacklogPolicy::DropOldest { cap: cap.max(1) },
            BacklogPolicy::DropNewest { cap } => BacklogPolicy::DropNewest { cap: cap.max(1) },
            BacklogPolicy::Reject { cap } => BacklogPolicy::Reject { cap: cap.max(1) },
        };
        let capacity = match policy {
            BacklogPolicy::Unbounded => Self::INITIAL_CAPACITY,
            BacklogPolicy::DropOldest { cap }
            | BacklogPolicy::DropNewest { cap }
            | BacklogPolicy::Reject { cap } => cap.min(Self::INITIAL_CAPACITY),
        };
        Self {
            words: VecDeque::with_capacity(capacity),
            policy,
            dropped: 0,
        }
    }

    pub fn push(&mut self, word: PackedWord) -> PushOutcome {
        match self.policy {
            BacklogPolicy::Unbounded => {
                self.words.push_back(word);
                PushOutcome::Queued
            }
            BacklogPolicy::DropOldest { cap } => {
                if self.words.len() >= cap {
                    self.words.pop_front();
                    self.dropped += 1;
                    self.words.push_back(word);
                    PushOutcome::EvictedOldest
                } else {
                    self.words.push_back(word);
                    PushOutcome::Queued
                }
            }
            BacklogPolicy::DropNewest { cap } => {
                if self.words.len() >= cap {
                    self.dropped += 1;
                    PushOutcome::DroppedNewest
                } else {
                    self.words.push_back(word);
                    PushOutcome::Queued
                }
            }
            BacklogPolicy::Reject { cap } => {
                if self.words.len() >= cap {
                    self.dropped += 1;
                    PushOutcome::Rejected
                } else {
                    self.words.push_back(word);
                    PushOutcome::Queued
                }
            }
        }
    }

    /// Removes and returns the oldest word.
    pub fn pop_front(&mut self) -> Option<PackedWord> {
        self.words.pop_front()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words lost to the backlog policy since construction.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn policy(&self) -> BacklogPolicy {
        self.policy
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new(BacklogPolicy::Unbounded)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fifo_order_survives_growth() {
        let mut q = CommandQueue::default();
        let n = CommandQueue::INITIAL_CAPACITY * 2 + 3;
        for i in 0..n {
            assert_eq!(q.push(i as u64), PushOutcome::Queued);
        }
        assert_eq!(q.len(), n);
        for i in 0..n {
            assert_eq!(q.pop_front(), Some(i as u64));
        }
        assert_eq!(q.pop_front(), None);
        assert_eq!(q.dropped(), 0);
    }

    #[test]
    fn drop_oldest_evicts_the_front() {
        let mut q = CommandQueue::new(BacklogPolicy::DropOldest { cap: 3 });
        for i in 0..3 {
            assert_eq!(q.push(i), PushOutcome::Queued);
        }
        assert_eq!(q.push(3), PushOutcome::EvictedOldest);
        assert_eq!(q.len(), 3);
        assert_eq!(q.dropped(), 1);
        // 0 was evicted; order of the survivors is unchanged.
        assert_eq!(q.pop_front(), Some(1));
        assert_eq!(q.pop_front(), Some(2));
        assert_eq!(q.pop_front(), Some(3));
    }

    #[test]
    fn drop_newest_discards_the_incoming_word() {
        let mut q = CommandQueue::new(BacklogPolicy::DropNewest { cap: 2 });
        assert_eq!(q.push(1), PushOutcome::Queued);
        assert_eq!(q.push(2), PushOutcome::Queued);
        assert_eq!(q.push(3), PushOutcome::DroppedNewest);
        assert_eq!(q.len(), 2);
        assert_eq!(q.dropped(), 1);
        assert_eq!(q.pop_front(), Some(1));
        assert_eq!(q.pop_front(), Some(2));
    }

    #[test]
    fn reject_refuses_at_capacity_and_recovers_after_pop() {
        let mut q = CommandQueue::new(BacklogPolicy::Reject { cap: 1 });
        assert_eq!(q.push(1), PushOutcome::Queued);
        assert_eq!(q.push(2), PushOutcome::Rejected);
        assert!(!q.push(2).is_queued());
        q.pop_front();
        assert_eq!(q.push(2), PushOutcome::Queued);
        assert_eq!(q.dropped(), 2);
    }

    #[test]
    fn unbounded_never_reports_loss() {
        let mut q = CommandQueue::default();
        for i in 0..10_000u64 {
            assert!(q.push(i).is_queued());
        }
        assert_eq!(q.dropped(), 0);
    }

    #[test]
    fn zero_caps_behave_as_a_bound_of_one() {
        let mut q = CommandQueue::new(BacklogPolicy::DropOldest { cap: 0 });
        assert_eq!(q.policy(), BacklogPolicy::DropOldest { cap: 1 });
        // The first push fits; nothing exists to evict yet.
        assert_eq!(q.push(1), PushOutcome::Queued);
        assert_eq!(q.dropped(), 0);
        assert_eq!(q.push(2), PushOutcome::EvictedOldest);
        assert_eq!(q.dropped(), 1);
        assert_eq!(q.pop_front(), Some(2));

        let mut q = CommandQueue::new(BacklogPolicy::Reject { cap: 0 });
        assert_eq!(q.push(1), PushOutcome::Queued);
        assert_eq!(q.push(2), PushOutcome::Rejected);
    }
}
