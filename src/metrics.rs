//! Metric helpers for `chunkframe`.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! the helpers compile to nothing. The engine's [`Counters`] remain the
//! authoritative in-process view; these only mirror them for scraping.
//!
//! [`Counters`]: crate::stats::Counters

#[cfg(feature = "metrics")]
use metrics::counter;

use crate::validator::ValidationOutcome;

/// Name of the counter tracking received chunks.
pub const CHUNKS_TOTAL: &str = "chunkframe_chunks_total";
/// Name of the counter tracking validated frames.
pub const FRAMES_TOTAL: &str = "chunkframe_frames_total";
/// Name of the counter tracking frames discarded before validation.
pub const FRAMES_DISCARDED: &str = "chunkframe_frames_discarded_total";

/// How a chunk fared against sequence tracking.
#[derive(Clone, Copy, Debug)]
pub enum ChunkStatus {
    /// The tag followed its predecessor.
    InOrder,
    /// The tag revealed lost or reordered chunks.
    Gap,
    /// The tag byte could not be decoded. Empty chunks are not recorded.
    Invalid,
}

impl ChunkStatus {
    #[cfg_attr(not(feature = "metrics"), allow(dead_code))]
    fn as_str(self) -> &'static str {
        match self {
            ChunkStatus::InOrder => "in_order",
            ChunkStatus::Gap => "gap",
            ChunkStatus::Invalid => "invalid",
        }
    }
}

/// Why an open frame was thrown away.
#[derive(Clone, Copy, Debug)]
pub enum DiscardReason {
    /// A sequence gap or undecodable tag made it unrecoverable.
    SequenceGap,
    /// It grew past the configured frame size limit.
    Oversize,
}

impl DiscardReason {
    #[cfg_attr(not(feature = "metrics"), allow(dead_code))]
    fn as_str(self) -> &'static str {
        match self {
            DiscardReason::SequenceGap => "gap",
            DiscardReason::Oversize => "oversize",
        }
    }
}

/// Record a received chunk.
#[cfg(feature = "metrics")]
pub fn inc_chunks(status: ChunkStatus) {
    counter!(CHUNKS_TOTAL, "status" => status.as_str()).increment(1);
}

/// Record a received chunk.
#[cfg(not(feature = "metrics"))]
pub fn inc_chunks(_status: ChunkStatus) {}

/// Record a validated frame and its outcome.
#[cfg(feature = "metrics")]
pub fn inc_frames(outcome: ValidationOutcome) {
    counter!(FRAMES_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

/// Record a validated frame and its outcome.
#[cfg(not(feature = "metrics"))]
pub fn inc_frames(_outcome: ValidationOutcome) {}

/// Record a frame discarded before validation.
#[cfg(feature = "metrics")]
pub fn inc_discarded(reason: DiscardReason) {
    counter!(FRAMES_DISCARDED, "reason" => reason.as_str()).increment(1);
}

/// Record a frame discarded before validation.
#[cfg(not(feature = "metrics"))]
pub fn inc_discarded(_reason: DiscardReason) {}
