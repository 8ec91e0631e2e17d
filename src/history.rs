//! Bounded window of the most recent raw chunks.
//!
//! Kept for presentation layers that show the live feed; nothing in the
//! engine reads it back.

use std::collections::VecDeque;

use bytes::Bytes;

use crate::config::DEFAULT_HISTORY_LEN;

/// FIFO of at most `capacity` chunks. The oldest chunk is evicted first.
#[derive(Clone, Debug)]
pub struct ChunkHistory {
    capacity: usize,
    chunks: VecDeque<Bytes>,
}

impl ChunkHistory {
    /// Create an empty window. A zero capacity retains nothing.
    ///
    /// Storage beyond [`DEFAULT_HISTORY_LEN`] entries grows on demand.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            chunks: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_LEN)),
        }
    }

    /// Record `chunk`, evicting the oldest entry when full.
    pub fn push(&mut self, chunk: Bytes) {
        if self.capacity == 0 {
            return;
        }
        if self.chunks.len() == self.capacity {
            self.chunks.pop_front();
        }
        self.chunks.push_back(chunk);
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Bytes> { self.chunks.iter() }

    /// Number of chunks retained.
    #[must_use]
    pub fn len(&self) -> usize { self.chunks.len() }

    /// Whether the window is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.chunks.is_empty() }

    /// Maximum number of chunks retained.
    #[must_use]
    pub const fn capacity(&self) -> usize { self.capacity }

    /// Drop every retained chunk.
    pub fn clear(&mut self) { self.chunks.clear(); }
}
