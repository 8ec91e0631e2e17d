//! Outbound helper producing tagged chunks, as the sending device does.
//!
//! [`Chunker`] splits a block of stream bytes into notification-sized chunks
//! and prefixes each with the next rolling [`SequenceTag`]. The tag persists
//! across blocks, so consecutive calls form one continuous sequence. Mostly
//! used to drive the engine in tests and simulations.

use bytes::{BufMut, Bytes, BytesMut};

use crate::{config::ReassemblyConfig, tag::SequenceTag};

/// Default ATT MTU negotiated by a fresh link.
pub const DEFAULT_MTU: u16 = 23;
/// Smallest MTU that still leaves one payload byte per chunk.
pub const MIN_MTU: u16 = 5;
/// ATT notification header bytes subtracted from the MTU.
const ATT_HEADER_LEN: usize = 3;

/// Splits stream bytes into tagged chunks sized for a transport MTU.
///
/// # Examples
///
/// ```
/// use chunkframe::chunker::Chunker;
///
/// let mut chunker = Chunker::new(8);
/// let chunks = chunker.chunk(b"#AB_AB");
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(&chunks[0][..], b"a#AB_");
/// assert_eq!(&chunks[1][..], b"bAB");
/// ```
#[derive(Clone, Debug)]
pub struct Chunker {
    mtu: u16,
    next_tag: SequenceTag,
}

impl Chunker {
    /// Create a chunker for `mtu`, clamped to at least [`MIN_MTU`].
    #[must_use]
    pub fn new(mtu: u16) -> Self {
        Self {
            mtu: mtu.max(MIN_MTU),
            next_tag: SequenceTag::zero(),
        }
    }

    /// Start the sequence at `tag` instead of zero.
    #[must_use]
    pub const fn with_starting_tag(mut self, tag: SequenceTag) -> Self {
        self.next_tag = tag;
        self
    }

    /// Effective MTU after clamping.
    #[must_use]
    pub const fn mtu(&self) -> u16 { self.mtu }

    /// Largest payload carried by one chunk, excluding its tag byte.
    #[must_use]
    pub fn max_chunk_payload(&self) -> usize { usize::from(self.mtu) - ATT_HEADER_LEN - 1 }

    /// Tag the next chunk will carry.
    #[must_use]
    pub const fn next_tag(&self) -> SequenceTag { self.next_tag }

    /// Split `data` into tagged chunks. Empty input yields no chunks and
    /// leaves the tag untouched.
    pub fn chunk(&mut self, data: &[u8]) -> Vec<Bytes> {
        data.chunks(self.max_chunk_payload())
            .map(|payload| {
                let mut chunk = BytesMut::with_capacity(payload.len() + 1);
                chunk.put_u8(self.next_tag.encode());
                chunk.put_slice(payload);
                self.next_tag = self.next_tag.next();
                chunk.freeze()
            })
            .collect()
    }
}

impl Default for Chunker {
    fn default() -> Self { Self::new(DEFAULT_MTU) }
}

/// Build a well-formed frame: `marker + body + center + body`.
///
/// `body` should not contain the frame marker, or the receiver will split
/// the frame there.
///
/// # Examples
///
/// ```
/// use chunkframe::{ReassemblyConfig, chunker::encode_frame};
///
/// let frame = encode_frame(&ReassemblyConfig::default(), b"HELLO");
/// assert_eq!(&frame[..], b"#HELLO_HELLO");
/// ```
#[must_use]
pub fn encode_frame(config: &ReassemblyConfig, body: &[u8]) -> Bytes {
    let mut frame = BytesMut::with_capacity(2 + 2 * body.len());
    frame.put_u8(config.frame_marker);
    frame.put_slice(body);
    frame.put_u8(config.center_marker);
    frame.put_slice(body);
    frame.freeze()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::validator::MessageValidator;

    #[rstest]
    #[case(DEFAULT_MTU, 19)]
    #[case(0, 1)]
    #[case(MIN_MTU, 1)]
    #[case(247, 243)]
    fn chunk_payload_follows_mtu(#[case] mtu: u16, #[case] expected: usize) {
        assert_eq!(Chunker::new(mtu).max_chunk_payload(), expected);
    }

    #[test]
    fn tags_roll_over_across_calls() {
        let mut chunker = Chunker::new(MIN_MTU);
        let first = chunker.chunk(&[b'x'; 10]);
        let second = chunker.chunk(&[b'y'; 10]);
        let tags: Vec<u8> = first.iter().chain(&second).map(|chunk| chunk[0]).collect();
        let expected: Vec<u8> = (0..20u8).map(|i| b'a' + i % 16).collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn empty_block_yields_no_chunks() {
        let mut chunker = Chunker::default();
        assert!(chunker.chunk(b"").is_empty());
        assert_eq!(chunker.next_tag(), SequenceTag::zero());
    }

    #[test]
    fn starting_tag_is_honoured() {
        let start = SequenceTag::new(15).expect("tag in range");
        let mut chunker = Chunker::default().with_starting_tag(start);
        let chunks = chunker.chunk(b"#A_A");
        assert_eq!(&chunks[0][..], b"p#A_A");
        assert_eq!(chunker.next_tag(), SequenceTag::zero());
    }

    #[test]
    fn encoded_frames_validate() {
        let config = ReassemblyConfig::default();
        let validator = MessageValidator::new(&config);
        for body in [&b""[..], &b"Z"[..], &b"QWERTYUIOP"[..]] {
            assert!(validator.validate(encode_frame(&config, body)).is_valid());
        }
    }
}
