//! Marker-delimited framing over the chunk payload stream.
//!
//! Chunk payloads are treated as one append-only byte stream. A frame begins
//! at a frame-start marker and ends just before the next one, so a frame is
//! only emitted once the following frame has started. The in-progress frame
//! is carried across chunk boundaries until then, or until the engine
//! discards it after a sequence gap.
//!
//! Bytes that arrive while no frame is open cannot be attributed to a frame
//! with a known start. They are dropped and only reported as a count.

mod decoder;

use std::{fmt, num::NonZeroUsize};

use bytes::{Bytes, BytesMut};

pub use decoder::FrameDecoder;

use crate::config::ReassemblyConfig;

/// A complete, still unvalidated frame. The first byte is always the
/// frame-start marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFrame(Bytes);

impl RawFrame {
    pub(crate) fn new(bytes: Bytes) -> Self {
        debug_assert!(!bytes.is_empty(), "frames always include their marker");
        Self(bytes)
    }

    /// Borrow the frame bytes, marker included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    /// Frame length in bytes, marker included.
    #[expect(
        clippy::len_without_is_empty,
        reason = "frames always contain their marker"
    )]
    #[must_use]
    pub fn len(&self) -> usize { self.0.len() }

    /// Consume the frame, returning the owned bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes { self.0 }
}

impl AsRef<[u8]> for RawFrame {
    fn as_ref(&self) -> &[u8] { &self.0 }
}

impl fmt::Display for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// One step of a [`FeedOutcome`], in stream order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedItem {
    /// A completed frame.
    Frame(RawFrame),
    /// An open frame was discarded for exceeding the size limit.
    Overflow,
}

/// Everything produced by one [`MessageFramer::feed`] call.
#[derive(Debug, Default)]
pub struct FeedOutcome {
    frames: Vec<RawFrame>,
    /// For each overflow, the number of frames completed before it.
    overflow_at: Vec<usize>,
    dropped: usize,
}

impl FeedOutcome {
    /// Frames completed by this payload, in stream order.
    #[must_use]
    pub fn frames(&self) -> &[RawFrame] { &self.frames }

    /// Number of partial frames discarded for exceeding the size limit.
    #[must_use]
    pub fn overflows(&self) -> usize { self.overflow_at.len() }

    /// Consume the outcome, returning frames and overflows interleaved in
    /// the order they occurred in the stream.
    #[must_use]
    pub fn into_items(self) -> Vec<FeedItem> {
        let mut items = Vec::with_capacity(self.frames.len() + self.overflow_at.len());
        let mut overflows = self.overflow_at.into_iter().peekable();
        for (index, frame) in self.frames.into_iter().enumerate() {
            while overflows.next_if(|&at| at <= index).is_some() {
                items.push(FeedItem::Overflow);
            }
            items.push(FeedItem::Frame(frame));
        }
        items.extend(overflows.map(|_| FeedItem::Overflow));
        items
    }

    fn record_overflow(&mut self) { self.overflow_at.push(self.frames.len()); }

    /// Number of payload bytes dropped because no frame was open.
    #[must_use]
    pub const fn dropped(&self) -> usize { self.dropped }
}

/// Split a stream of chunk payloads into [`RawFrame`]s.
///
/// # Examples
///
/// ```
/// use chunkframe::{ReassemblyConfig, framer::MessageFramer};
///
/// let mut framer = MessageFramer::new(&ReassemblyConfig::default());
/// assert!(framer.feed(b"#AB_").frames().is_empty());
/// assert!(framer.feed(b"AB").frames().is_empty());
///
/// let outcome = framer.feed(b"#CD_CD");
/// assert_eq!(outcome.frames().len(), 1);
/// assert_eq!(outcome.frames()[0].as_bytes(), b"#AB_AB");
/// assert_eq!(framer.partial_len(), Some(6));
/// ```
#[derive(Debug)]
pub struct MessageFramer {
    marker: u8,
    max_frame_len: Option<NonZeroUsize>,
    partial: Option<BytesMut>,
}

impl MessageFramer {
    /// Create a framer using the markers and limits from `config`.
    #[must_use]
    pub fn new(config: &ReassemblyConfig) -> Self {
        Self {
            marker: config.frame_marker,
            max_frame_len: config.max_frame_len,
            partial: None,
        }
    }

    /// Append `payload` to the stream and return the frames it completes.
    pub fn feed(&mut self, payload: &[u8]) -> FeedOutcome {
        let mut outcome = FeedOutcome::default();
        let mut start = 0;
        let mut search_from = 0;

        while let Some(i) = find_marker(payload, search_from, self.marker) {
            if let Some(frame) = self.finish_frame(&payload[start..i], &mut outcome) {
                outcome.frames.push(frame);
            }
            self.partial = Some(BytesMut::new());
            start = i;
            search_from = i + 1;
        }

        self.extend_partial(&payload[start..], &mut outcome);
        outcome
    }

    /// Discard the in-progress frame, returning how many bytes it held.
    pub fn reset(&mut self) -> usize { self.partial.take().map_or(0, |partial| partial.len()) }

    /// Whether a frame is currently open.
    #[must_use]
    pub const fn has_partial(&self) -> bool { self.partial.is_some() }

    /// Length of the open frame, if any.
    #[must_use]
    pub fn partial_len(&self) -> Option<usize> { self.partial.as_ref().map(BytesMut::len) }

    /// Close the open frame with `tail`, honouring the size limit.
    fn finish_frame(&mut self, tail: &[u8], outcome: &mut FeedOutcome) -> Option<RawFrame> {
        let Some(mut partial) = self.partial.take() else {
            outcome.dropped += tail.len();
            return None;
        };
        if self.exceeds_limit(partial.len(), tail.len()) {
            outcome.record_overflow();
            return None;
        }
        partial.extend_from_slice(tail);
        Some(RawFrame::new(partial.freeze()))
    }

    /// Append `bytes` to the open frame without closing it.
    fn extend_partial(&mut self, bytes: &[u8], outcome: &mut FeedOutcome) {
        let Some(current) = self.partial_len() else {
            outcome.dropped += bytes.len();
            return;
        };
        if self.exceeds_limit(current, bytes.len()) {
            self.partial = None;
            outcome.record_overflow();
            return;
        }
        if let Some(partial) = self.partial.as_mut() {
            partial.extend_from_slice(bytes);
        }
    }

    fn exceeds_limit(&self, current: usize, extra: usize) -> bool {
        self.max_frame_len
            .is_some_and(|limit| current.saturating_add(extra) > limit.get())
    }
}

/// Position of the first `marker` in `bytes` at or after `from`.
pub(crate) fn find_marker(bytes: &[u8], from: usize, marker: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&byte| byte == marker)
        .map(|offset| from + offset)
}
