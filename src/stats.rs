//! Chunk and frame counters.

/// Snapshot of the engine counters.
///
/// Counts only grow for the lifetime of an engine; [`Statistics::reset`] is
/// the one way back to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    /// Chunks carrying at least a tag byte.
    pub total_chunks: u64,
    /// Sequence gaps and undecodable tags, one per event.
    pub bad_chunks: u64,
    /// Frames handed to the validator.
    pub total_frames: u64,
    /// Invalid frames plus frames presumed lost or discarded.
    pub bad_frames: u64,
}

/// Increment-only counter set.
#[derive(Clone, Debug, Default)]
pub struct Statistics {
    counters: Counters,
}

impl Statistics {
    /// Create a zeroed counter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counters: Counters {
                total_chunks: 0,
                bad_chunks: 0,
                total_frames: 0,
                bad_frames: 0,
            },
        }
    }

    /// Count a received chunk.
    pub fn record_chunk(&mut self) { self.counters.total_chunks += 1; }

    /// Count a sequence gap: one bad chunk and one presumed-lost frame.
    pub fn record_gap(&mut self) {
        self.counters.bad_chunks += 1;
        self.counters.bad_frames += 1;
    }

    /// Count a validated frame.
    pub fn record_frame(&mut self, valid: bool) {
        self.counters.total_frames += 1;
        if !valid {
            self.counters.bad_frames += 1;
        }
    }

    /// Count a frame discarded before validation.
    pub fn record_discarded_frame(&mut self) { self.counters.bad_frames += 1; }

    /// Copy out the current counters.
    #[must_use]
    pub const fn snapshot(&self) -> Counters { self.counters }

    /// Return every counter to zero.
    pub fn reset(&mut self) { self.counters = Counters::default(); }
}
