//! Structural integrity check for reassembled frames.
//!
//! A well-formed frame carries its body twice around a center marker:
//! `marker + body + center + body`. Any corruption on the link is expected
//! to break the length parity, move the center marker, or make the two
//! copies disagree.

use std::fmt;

use crate::config::ReassemblyConfig;

/// Verdict for a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationOutcome {
    /// The frame is well-formed.
    Valid,
    /// The frame length is odd.
    OddLength,
    /// The byte at the midpoint is not the center marker.
    MissingCenterMarker,
    /// The two copies of the body differ.
    HalvesMismatch,
}

impl ValidationOutcome {
    /// Whether the frame passed validation.
    #[must_use]
    pub const fn is_valid(self) -> bool { matches!(self, Self::Valid) }

    /// Stable lowercase name, used in logs and metric labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::OddLength => "odd_length",
            Self::MissingCenterMarker => "missing_center_marker",
            Self::HalvesMismatch => "halves_mismatch",
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Checks frames for the mirrored-halves layout.
///
/// # Examples
///
/// ```
/// use chunkframe::{
///     ReassemblyConfig,
///     validator::{MessageValidator, ValidationOutcome},
/// };
///
/// let validator = MessageValidator::new(&ReassemblyConfig::default());
/// assert_eq!(validator.validate(b"#AB_AB"), ValidationOutcome::Valid);
/// assert_eq!(validator.validate(b"#AB_XY"), ValidationOutcome::HalvesMismatch);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MessageValidator {
    center_marker: u8,
}

impl MessageValidator {
    /// Create a validator using the center marker from `config`.
    #[must_use]
    pub const fn new(config: &ReassemblyConfig) -> Self {
        Self {
            center_marker: config.center_marker,
        }
    }

    /// Classify `frame`. Rules apply in order: length parity, center marker,
    /// then equality of the two halves (the leading marker is excluded from
    /// the left half).
    #[must_use]
    pub fn validate(&self, frame: impl AsRef<[u8]>) -> ValidationOutcome {
        let frame = frame.as_ref();
        if frame.len() % 2 != 0 {
            return ValidationOutcome::OddLength;
        }

        let mid = frame.len() / 2;
        if frame.get(mid) != Some(&self.center_marker) {
            return ValidationOutcome::MissingCenterMarker;
        }

        if frame[1..mid] != frame[mid + 1..] {
            return ValidationOutcome::HalvesMismatch;
        }

        ValidationOutcome::Valid
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn validator() -> MessageValidator { MessageValidator::new(&ReassemblyConfig::default()) }

    #[rstest]
    #[case(&b"#AB_AB"[..], ValidationOutcome::Valid)]
    #[case(&b"#_"[..], ValidationOutcome::Valid)]
    #[case(&b"#Q_Q"[..], ValidationOutcome::Valid)]
    #[case(&b"#AB_XY"[..], ValidationOutcome::HalvesMismatch)]
    #[case(&b"#AB_BA"[..], ValidationOutcome::HalvesMismatch)]
    #[case(&b"#ABC_AB"[..], ValidationOutcome::OddLength)]
    #[case(&b"#"[..], ValidationOutcome::OddLength)]
    #[case(&b"#ABXAB"[..], ValidationOutcome::MissingCenterMarker)]
    #[case(&b"#ABCAB"[..], ValidationOutcome::MissingCenterMarker)]
    #[case(&b"#ABCXABC"[..], ValidationOutcome::MissingCenterMarker)]
    #[case(&b"#A"[..], ValidationOutcome::MissingCenterMarker)]
    #[case(&b""[..], ValidationOutcome::MissingCenterMarker)]
    fn classifies_frames(#[case] frame: &[u8], #[case] expected: ValidationOutcome) {
        assert_eq!(validator().validate(frame), expected);
    }

    #[test]
    fn parity_is_checked_before_center() {
        assert_eq!(validator().validate(b"#A_AB"), ValidationOutcome::OddLength);
    }

    #[test]
    fn custom_center_marker() {
        let validator = MessageValidator::new(&ReassemblyConfig::default().with_center_marker(b'|'));
        assert_eq!(validator.validate(b"#AB|AB"), ValidationOutcome::Valid);
        assert_eq!(
            validator.validate(b"#AB_AB"),
            ValidationOutcome::MissingCenterMarker
        );
    }

    #[rstest]
    #[case(ValidationOutcome::Valid, true)]
    #[case(ValidationOutcome::OddLength, false)]
    #[case(ValidationOutcome::HalvesMismatch, false)]
    fn validity_flag(#[case] outcome: ValidationOutcome, #[case] valid: bool) {
        assert_eq!(outcome.is_valid(), valid);
    }
}
