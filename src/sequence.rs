//! Loss detection over consecutive chunk tags.
//!
//! `SequenceTracker` only remembers the last tag it saw. Tracking resumes from
//! whichever tag actually arrived, so one lost chunk yields one gap rather
//! than a cascade of them.

use crate::tag::SequenceTag;

/// Result of observing a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceStatus {
    /// The tag directly follows the previous one, or there was no previous one.
    InOrder,
    /// At least one chunk between the previous tag and this one went missing
    /// or arrived out of order.
    Gap {
        /// Tag that should have arrived.
        expected: SequenceTag,
        /// Tag that did arrive.
        found: SequenceTag,
    },
}

impl SequenceStatus {
    /// Whether the observation was in order.
    #[must_use]
    pub const fn is_in_order(self) -> bool { matches!(self, Self::InOrder) }
}

/// Track the expected ordering of chunk tags.
#[derive(Clone, Debug, Default)]
pub struct SequenceTracker {
    last_tag: Option<SequenceTag>,
}

impl SequenceTracker {
    /// Create a tracker with no previous tag.
    #[must_use]
    pub const fn new() -> Self { Self { last_tag: None } }

    /// Record `tag` and report whether it followed the previous tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkframe::{
    ///     sequence::{SequenceStatus, SequenceTracker},
    ///     tag::SequenceTag,
    /// };
    ///
    /// let tag = |v| SequenceTag::new(v).expect("tag in range");
    /// let mut tracker = SequenceTracker::new();
    /// assert_eq!(tracker.observe(tag(7)), SequenceStatus::InOrder);
    /// assert_eq!(tracker.observe(tag(8)), SequenceStatus::InOrder);
    /// assert_eq!(
    ///     tracker.observe(tag(10)),
    ///     SequenceStatus::Gap {
    ///         expected: tag(9),
    ///         found: tag(10)
    ///     }
    /// );
    /// assert_eq!(tracker.observe(tag(11)), SequenceStatus::InOrder);
    /// ```
    pub fn observe(&mut self, tag: SequenceTag) -> SequenceStatus {
        let status = match self.last_tag {
            Some(last) if last.next() != tag => SequenceStatus::Gap {
                expected: last.next(),
                found: tag,
            },
            _ => SequenceStatus::InOrder,
        };
        self.last_tag = Some(tag);
        status
    }

    /// Forget the previous tag so the next observation starts a new sequence.
    pub fn reset(&mut self) { self.last_tag = None; }

    /// Most recently observed tag.
    #[must_use]
    pub const fn last_tag(&self) -> Option<SequenceTag> { self.last_tag }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn tag(value: u8) -> SequenceTag { SequenceTag::new(value).expect("tag in range") }

    #[rstest]
    #[case(0)]
    #[case(9)]
    #[case(15)]
    fn first_observation_is_in_order(#[case] first: u8) {
        let mut tracker = SequenceTracker::new();
        assert_eq!(tracker.observe(tag(first)), SequenceStatus::InOrder);
        assert_eq!(tracker.last_tag(), Some(tag(first)));
    }

    #[test]
    fn full_cycle_with_wrap_stays_in_order() {
        let mut tracker = SequenceTracker::new();
        let mut current = tag(12);
        tracker.observe(current);
        for _ in 0..40 {
            current = current.next();
            assert!(tracker.observe(current).is_in_order());
        }
    }

    #[test]
    fn multi_tag_skip_reports_single_gap() {
        let mut tracker = SequenceTracker::new();
        tracker.observe(tag(1));
        assert_eq!(
            tracker.observe(tag(6)),
            SequenceStatus::Gap {
                expected: tag(2),
                found: tag(6)
            }
        );
        assert!(tracker.observe(tag(7)).is_in_order());
    }

    #[test]
    fn repeated_tag_is_a_gap() {
        let mut tracker = SequenceTracker::new();
        tracker.observe(tag(4));
        assert!(!tracker.observe(tag(4)).is_in_order());
    }

    #[test]
    fn reset_forgets_previous_tag() {
        let mut tracker = SequenceTracker::new();
        tracker.observe(tag(3));
        tracker.reset();
        assert_eq!(tracker.last_tag(), None);
        assert!(tracker.observe(tag(11)).is_in_order());
    }
}
