//! `tokio_util` decoder applying the marker scan to an untagged byte stream.
//!
//! Useful when the caller already holds an ordered byte stream (a serial
//! capture, a file) rather than tagged chunks. There is no sequence tracking:
//! the decoder trusts the stream to be contiguous.

use std::{io, num::NonZeroUsize};

use bytes::{Buf, BytesMut};
use log::warn;
use tokio_util::codec::Decoder;

use super::{RawFrame, find_marker};
use crate::config::ReassemblyConfig;

/// Decoder yielding [`RawFrame`]s from a contiguous byte stream.
///
/// A frame is yielded once the next frame-start marker has been buffered, or
/// at end of stream. Oversize frames are skipped and counted rather than
/// failing the stream.
///
/// # Examples
///
/// ```
/// use bytes::BytesMut;
/// use chunkframe::{ReassemblyConfig, framer::FrameDecoder};
/// use tokio_util::codec::Decoder;
///
/// let mut decoder = FrameDecoder::new(&ReassemblyConfig::default());
/// let mut buf = BytesMut::from(&b"noise#AB_AB#C"[..]);
/// let frame = decoder
///     .decode(&mut buf)
///     .expect("decoding never fails")
///     .expect("first frame is complete");
/// assert_eq!(frame.as_bytes(), b"#AB_AB");
/// assert_eq!(&buf[..], b"#C");
/// ```
#[derive(Clone, Debug)]
pub struct FrameDecoder {
    marker: u8,
    max_frame_len: Option<NonZeroUsize>,
    overflows: u64,
}

impl FrameDecoder {
    /// Create a decoder using the marker and size limit from `config`.
    #[must_use]
    pub fn new(config: &ReassemblyConfig) -> Self {
        Self {
            marker: config.frame_marker,
            max_frame_len: config.max_frame_len,
            overflows: 0,
        }
    }

    /// Number of frames skipped for exceeding the size limit.
    #[must_use]
    pub const fn overflows(&self) -> u64 { self.overflows }

    fn too_long(&self, len: usize) -> bool {
        self.max_frame_len.is_some_and(|limit| len > limit.get())
    }

    fn record_overflow(&mut self, len: usize) {
        self.overflows += 1;
        warn!("skipping oversize frame: len={len}, limit={:?}", self.max_frame_len);
    }

    /// Drop bytes preceding the first marker. Returns `false` when no marker
    /// is buffered at all.
    fn align(&self, src: &mut BytesMut) -> bool {
        match find_marker(src, 0, self.marker) {
            Some(offset) => {
                src.advance(offset);
                true
            }
            None => {
                src.clear();
                false
            }
        }
    }
}

impl Decoder for FrameDecoder {
    type Item = RawFrame;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            if !self.align(src) {
                return Ok(None);
            }

            let Some(end) = find_marker(src, 1, self.marker) else {
                if self.too_long(src.len()) {
                    self.record_overflow(src.len());
                    // The rest of this frame is dropped by the next alignment.
                    src.clear();
                }
                return Ok(None);
            };

            let frame = src.split_to(end).freeze();
            if self.too_long(frame.len()) {
                self.record_overflow(frame.len());
                continue;
            }
            return Ok(Some(RawFrame::new(frame)));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        if src.is_empty() {
            return Ok(None);
        }
        // End of stream terminates the trailing frame.
        let frame = src.split().freeze();
        Ok(Some(RawFrame::new(frame)))
    }
}
