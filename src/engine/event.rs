//! Events returned to the caller for every processed chunk.
//!
//! Events carry enough detail (tag, ordering, per-frame verdicts, counters)
//! for a presentation layer to render without repeating protocol logic.

use std::num::NonZeroUsize;

use crate::{framer::RawFrame, stats::Counters, tag::SequenceTag, validator::ValidationOutcome};

/// Summary of one processed chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkProcessed {
    /// Tag carried by the chunk.
    pub tag: SequenceTag,
    /// Whether the tag followed its predecessor.
    pub in_order: bool,
    /// Number of frames the chunk completed.
    pub frame_count: usize,
}

/// A completed frame and its validation verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameEvent {
    frame: RawFrame,
    outcome: ValidationOutcome,
}

impl FrameEvent {
    pub(crate) fn new(frame: RawFrame, outcome: ValidationOutcome) -> Self { Self { frame, outcome } }

    /// The frame as reassembled, marker included.
    #[must_use]
    pub fn frame(&self) -> &RawFrame { &self.frame }

    /// Validation verdict.
    #[must_use]
    pub const fn outcome(&self) -> ValidationOutcome { self.outcome }
}

/// A single observable step of chunk processing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// The chunk's tag did not follow its predecessor; the open frame was
    /// discarded.
    SequenceGap {
        /// Tag that should have arrived.
        expected: SequenceTag,
        /// Tag that did arrive.
        found: SequenceTag,
        /// Bytes of the open frame thrown away.
        discarded: usize,
    },
    /// An open frame outgrew the size limit and was discarded.
    FrameOverflow {
        /// Configured limit.
        limit: NonZeroUsize,
    },
    /// A frame was completed and validated.
    Frame(FrameEvent),
    /// The chunk has been fully processed.
    ChunkProcessed(ChunkProcessed),
    /// Counters after the chunk.
    Statistics(Counters),
}

/// Ordered events for one chunk.
///
/// The final two events are always [`EngineEvent::ChunkProcessed`] followed
/// by [`EngineEvent::Statistics`]; both are also available directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineEvents {
    events: Vec<EngineEvent>,
    chunk: ChunkProcessed,
    statistics: Counters,
}

impl EngineEvents {
    pub(crate) fn new(mut events: Vec<EngineEvent>, chunk: ChunkProcessed, statistics: Counters) -> Self {
        events.push(EngineEvent::ChunkProcessed(chunk));
        events.push(EngineEvent::Statistics(statistics));
        Self {
            events,
            chunk,
            statistics,
        }
    }

    /// Chunk summary.
    #[must_use]
    pub const fn chunk(&self) -> ChunkProcessed { self.chunk }

    /// Counters after this chunk.
    #[must_use]
    pub const fn statistics(&self) -> Counters { self.statistics }

    /// Frames completed by this chunk, in stream order.
    pub fn frames(&self) -> impl Iterator<Item = &FrameEvent> {
        self.events.iter().filter_map(|event| match event {
            EngineEvent::Frame(frame) => Some(frame),
            _ => None,
        })
    }

    /// The sequence gap reported for this chunk, if any.
    #[must_use]
    pub fn gap(&self) -> Option<&EngineEvent> {
        self.events
            .iter()
            .find(|event| matches!(event, EngineEvent::SequenceGap { .. }))
    }

    /// All events in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, EngineEvent> { self.events.iter() }

    /// All events in emission order.
    #[must_use]
    pub fn as_slice(&self) -> &[EngineEvent] { &self.events }
}

impl IntoIterator for EngineEvents {
    type Item = EngineEvent;
    type IntoIter = std::vec::IntoIter<EngineEvent>;

    fn into_iter(self) -> Self::IntoIter { self.events.into_iter() }
}

impl<'a> IntoIterator for &'a EngineEvents {
    type Item = &'a EngineEvent;
    type IntoIter = std::slice::Iter<'a, EngineEvent>;

    fn into_iter(self) -> Self::IntoIter { self.events.iter() }
}
