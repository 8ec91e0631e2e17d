//! Error types surfaced by the reassembly engine.
//!
//! Only chunk-level decoding can fail. Sequence gaps and malformed frames are
//! ordinary outcomes on a lossy link and are reported as events instead.

use thiserror::Error;

use crate::tag::{TAG_BASE, TAG_MODULUS};

/// A chunk that could not be decoded into a tag and payload.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InvalidChunk {
    /// The transport delivered zero bytes, so no tag is available.
    #[error("empty chunk carries no sequence tag")]
    Empty,
    /// The leading byte does not encode a tag in `'a'..='p'`.
    #[error(
        "tag byte {byte:#04x} outside {first:?}..={last:?}",
        first = char::from(TAG_BASE),
        last = char::from(TAG_BASE + TAG_MODULUS - 1)
    )]
    TagOutOfRange {
        /// Raw byte found in the tag position.
        byte: u8,
    },
}

impl InvalidChunk {
    /// Whether the chunk still counts towards `total_chunks`.
    ///
    /// An empty chunk never reached the tag decoder, so it is not counted.
    #[must_use]
    pub const fn is_counted(self) -> bool { matches!(self, Self::TagOutOfRange { .. }) }
}
