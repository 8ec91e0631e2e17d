//! Rolling 4-bit sequence tags carried in the first byte of every chunk.
//!
//! Tags are transmitted as the ASCII letters `'a'..='p'` and wrap from 15 back
//! to 0. They are only meaningful relative to the previous chunk.

use derive_more::Display;

use crate::error::InvalidChunk;

/// Number of distinct tag values before wrapping.
pub const TAG_MODULUS: u8 = 16;

/// Wire byte encoding tag zero.
pub const TAG_BASE: u8 = b'a';

/// Sequence tag in `0..16`.
///
/// # Examples
///
/// ```
/// use chunkframe::tag::SequenceTag;
///
/// let tag = SequenceTag::decode(b'p').expect("valid tag byte");
/// assert_eq!(tag.get(), 15);
/// assert_eq!(tag.next(), SequenceTag::zero());
/// assert_eq!(tag.next().encode(), b'a');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{_0}")]
pub struct SequenceTag(u8);

impl SequenceTag {
    /// Construct a tag, returning `None` when `value` is not below [`TAG_MODULUS`].
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value < TAG_MODULUS {
            Some(Self(value))
        } else {
            None
        }
    }

    /// First tag of a sequence.
    #[must_use]
    pub const fn zero() -> Self { Self(0) }

    /// Return the numeric tag value.
    #[must_use]
    pub const fn get(self) -> u8 { self.0 }

    /// Tag expected to follow this one.
    #[must_use]
    pub const fn next(self) -> Self { Self((self.0 + 1) % TAG_MODULUS) }

    /// Encode the tag as its wire byte.
    #[must_use]
    pub const fn encode(self) -> u8 { TAG_BASE + self.0 }

    /// Decode a wire byte into a tag.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidChunk::TagOutOfRange`] when `byte` is not one of
    /// `'a'..='p'`.
    pub fn decode(byte: u8) -> Result<Self, InvalidChunk> {
        byte.checked_sub(TAG_BASE)
            .and_then(Self::new)
            .ok_or(InvalidChunk::TagOutOfRange { byte })
    }
}

impl From<SequenceTag> for u8 {
    fn from(value: SequenceTag) -> Self { value.0 }
}
