//! Bounded conversation history
//!
//! A capped message list whose first entry (the anchor, normally the system
//! prompt) survives every eviction.

use thiserror::Error;
use tracing::{debug, trace};

use reflect_provider::Message;

/// Invalid history configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("history capacity must be at least 1")]
    ZeroCapacity,

    #[error("history capacity {capacity} is smaller than the {seed} seed messages")]
    SeedExceedsCapacity { seed: usize, capacity: usize },

    #[error("history capacity 1 leaves no room beside the anchor")]
    AnchorFillsCapacity,
}

pub type Result<T> = std::result::Result<T, HistoryError>;

/// Message history capped at `capacity` entries.
///
/// When built from a non-empty seed, entry 0 is the anchor and is never
/// evicted or shifted; once full, each append drops the oldest entry after
/// the anchor. When built from an empty seed the history is a plain FIFO.
#[derive(Debug, Clone)]
pub struct BoundedHistory {
    messages: Vec<Message>,
    capacity: usize,
    anchored: bool,
}

impl BoundedHistory {
    /// Create a history from seed messages.
    ///
    /// Fails when `capacity` is zero, smaller than the seed, or exactly one
    /// with an anchor (the anchor would occupy the only slot).
    pub fn new(initial: Vec<Message>, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        if capacity < initial.len() {
            return Err(HistoryError::SeedExceedsCapacity {
                seed: initial.len(),
                capacity,
            });
        }
        let anchored = !initial.is_empty();
        if anchored && capacity == 1 {
            return Err(HistoryError::AnchorFillsCapacity);
        }

        let mut messages = Vec::with_capacity(capacity);
        messages.extend(initial);

        Ok(Self {
            messages,
            capacity,
            anchored,
        })
    }

    /// Append a message, evicting the oldest non-anchor entry when full
    pub fn append(&mut self, message: Message) {
        if self.messages.len() >= self.capacity {
            let index = if self.anchored { 1 } else { 0 };
            let evicted = self.messages.remove(index);
            debug!(
                "History full ({}), evicted {} message at {}",
                self.capacity,
                evicted.role(),
                index
            );
        }
        trace!("History append: {}", message.role());
        self.messages.push(message);
    }

    /// Owned snapshot of the current messages
    pub fn as_sequence(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Borrowed view of the current messages
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The protected first entry, if the history was seeded
    pub fn anchor(&self) -> Option<&Message> {
        if self.anchored {
            self.messages.first()
        } else {
            None
        }
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.messages.len() >= self.capacity
    }
}
