//! Per-session orchestration of tag tracking, framing and validation.
//!
//! [`ReassemblyEngine`] is the only entry point a transport adaptor needs.
//! Each call to [`ReassemblyEngine::process_chunk`] runs to completion:
//!
//! 1. decode the tag byte and count the chunk;
//! 2. check the tag against its predecessor, discarding the open frame on a
//!    gap;
//! 3. feed the payload to the framer;
//! 4. validate every completed frame;
//! 5. return the resulting events and counters.
//!
//! The engine owns all session state and performs no locking. Chunks must be
//! delivered one at a time in arrival order; independent sessions use
//! independent engines.

mod event;

use bytes::Bytes;
use log::{debug, warn};

pub use event::{ChunkProcessed, EngineEvent, EngineEvents, FrameEvent};

use crate::{
    config::ReassemblyConfig,
    error::InvalidChunk,
    framer::{FeedItem, MessageFramer},
    history::ChunkHistory,
    metrics::{self, ChunkStatus, DiscardReason},
    sequence::{SequenceStatus, SequenceTracker},
    stats::{Counters, Statistics},
    tag::SequenceTag,
    validator::MessageValidator,
};

/// Reassembles frames from tagged chunks and tracks loss statistics.
///
/// # Examples
///
/// ```
/// use chunkframe::{ReassemblyEngine, validator::ValidationOutcome};
///
/// let mut engine = ReassemblyEngine::default();
/// engine.process_chunk(b"a#AB_AB").expect("valid chunk");
/// let events = engine.process_chunk(b"b#CD_CD").expect("valid chunk");
///
/// let frames: Vec<_> = events.frames().collect();
/// assert_eq!(frames.len(), 1);
/// assert_eq!(frames[0].frame().as_bytes(), b"#AB_AB");
/// assert_eq!(frames[0].outcome(), ValidationOutcome::Valid);
/// assert_eq!(events.statistics().total_frames, 1);
/// ```
#[derive(Debug)]
pub struct ReassemblyEngine {
    config: ReassemblyConfig,
    tracker: SequenceTracker,
    framer: MessageFramer,
    validator: MessageValidator,
    stats: Statistics,
    history: ChunkHistory,
}

impl ReassemblyEngine {
    /// Create an engine for a fresh session.
    #[must_use]
    pub fn new(config: ReassemblyConfig) -> Self {
        Self {
            config,
            tracker: SequenceTracker::new(),
            framer: MessageFramer::new(&config),
            validator: MessageValidator::new(&config),
            stats: Statistics::new(),
            history: ChunkHistory::new(config.history_len),
        }
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &ReassemblyConfig { &self.config }

    /// Process one chunk as delivered by the transport.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidChunk::Empty`] when `chunk` has no tag byte; nothing
    /// is counted. Returns [`InvalidChunk::TagOutOfRange`] when the tag byte
    /// is not a valid tag; the chunk is counted as a bad chunk, the open
    /// frame is discarded as a lost frame, and tag tracking restarts with
    /// the next chunk. Neither error leaves the engine unusable.
    pub fn process_chunk(&mut self, chunk: &[u8]) -> Result<EngineEvents, InvalidChunk> {
        let Some((&tag_byte, payload)) = chunk.split_first() else {
            warn!("dropping empty chunk");
            return Err(InvalidChunk::Empty);
        };

        self.history.push(Bytes::copy_from_slice(chunk));
        self.stats.record_chunk();

        let tag = match SequenceTag::decode(tag_byte) {
            Ok(tag) => tag,
            Err(err) => {
                self.abandon_sequence();
                warn!("dropping undecodable chunk: error={err}");
                metrics::inc_chunks(ChunkStatus::Invalid);
                return Err(err);
            }
        };

        let mut events = Vec::new();
        let status = self.tracker.observe(tag);
        if let SequenceStatus::Gap { expected, found } = status {
            let discarded = self.framer.reset();
            self.stats.record_gap();
            metrics::inc_chunks(ChunkStatus::Gap);
            metrics::inc_discarded(DiscardReason::SequenceGap);
            warn!("sequence gap: expected={expected}, found={found}, discarded={discarded}");
            events.push(EngineEvent::SequenceGap {
                expected,
                found,
                discarded,
            });
        } else {
            metrics::inc_chunks(ChunkStatus::InOrder);
        }

        let fed = self.framer.feed(payload);
        if fed.dropped() > 0 {
            debug!("dropped bytes outside any frame: tag={tag}, dropped={}", fed.dropped());
        }
        let mut frame_count = 0;
        for item in fed.into_items() {
            match item {
                FeedItem::Overflow => self.discard_oversize(&mut events),
                FeedItem::Frame(frame) => {
                    frame_count += 1;
                    let outcome = self.validator.validate(&frame);
                    self.stats.record_frame(outcome.is_valid());
                    metrics::inc_frames(outcome);
                    if !outcome.is_valid() {
                        warn!("invalid frame: outcome={outcome}, len={}, frame={frame}", frame.len());
                    }
                    events.push(EngineEvent::Frame(FrameEvent::new(frame, outcome)));
                }
            }
        }

        let chunk = ChunkProcessed {
            tag,
            in_order: status.is_in_order(),
            frame_count,
        };
        Ok(EngineEvents::new(events, chunk, self.stats.snapshot()))
    }

    /// Clear all session state: tag tracking, the open frame, counters and
    /// the chunk history.
    ///
    /// Call this when the transport starts a new session so stale state does
    /// not leak across reconnects.
    pub fn reset(&mut self) {
        let discarded = self.framer.reset();
        self.tracker.reset();
        self.stats.reset();
        self.history.clear();
        debug!("engine reset: discarded={discarded}");
    }

    /// Current counters. Does not alter any state.
    #[must_use]
    pub const fn snapshot_statistics(&self) -> Counters { self.stats.snapshot() }

    /// Most recent raw chunks, oldest first.
    #[must_use]
    pub const fn history(&self) -> &ChunkHistory { &self.history }

    /// Whether a frame is currently open across chunk boundaries.
    #[must_use]
    pub const fn has_partial_frame(&self) -> bool { self.framer.has_partial() }

    fn discard_oversize(&mut self, events: &mut Vec<EngineEvent>) {
        // The framer only overflows when a limit is configured.
        let Some(limit) = self.config.max_frame_len else {
            return;
        };
        self.stats.record_discarded_frame();
        metrics::inc_discarded(DiscardReason::Oversize);
        warn!("discarding oversize frame: limit={limit}");
        events.push(EngineEvent::FrameOverflow { limit });
    }

    /// Treat an undecodable chunk like a gap: count it, drop the open frame,
    /// and restart tag tracking.
    fn abandon_sequence(&mut self) {
        let discarded = self.framer.reset();
        self.tracker.reset();
        self.stats.record_gap();
        metrics::inc_discarded(DiscardReason::SequenceGap);
        debug!("sequence abandoned: discarded={discarded}");
    }
}

impl Default for ReassemblyEngine {
    fn default() -> Self { Self::new(ReassemblyConfig::default()) }
}
