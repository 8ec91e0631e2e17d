//! Engine configuration.
//!
//! The defaults reproduce the reference wire format: frames open with `#`,
//! carry `_` at their midpoint, and are not length-limited.

use std::num::NonZeroUsize;

/// Default frame-start marker.
pub const DEFAULT_FRAME_MARKER: u8 = b'#';
/// Default frame-center marker.
pub const DEFAULT_CENTER_MARKER: u8 = b'_';
/// Default number of raw chunks retained for display.
pub const DEFAULT_HISTORY_LEN: usize = 16;

/// Settings shared by the framer, validator and engine.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use chunkframe::ReassemblyConfig;
///
/// let config = ReassemblyConfig::default()
///     .with_frame_marker(b'$')
///     .with_max_frame_len(NonZeroUsize::new(512));
/// assert_eq!(config.frame_marker, b'$');
/// assert_eq!(config.center_marker, b'_');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReassemblyConfig {
    /// Byte that opens every frame.
    pub frame_marker: u8,
    /// Byte required at the midpoint of a valid frame.
    pub center_marker: u8,
    /// Largest frame the framer will buffer, marker included.
    ///
    /// `None` leaves partial frames unbounded.
    pub max_frame_len: Option<NonZeroUsize>,
    /// Number of most recent raw chunks kept for a presentation layer.
    pub history_len: usize,
}

impl ReassemblyConfig {
    /// Replace the frame-start marker.
    #[must_use]
    pub const fn with_frame_marker(mut self, marker: u8) -> Self {
        self.frame_marker = marker;
        self
    }

    /// Replace the frame-center marker.
    #[must_use]
    pub const fn with_center_marker(mut self, marker: u8) -> Self {
        self.center_marker = marker;
        self
    }

    /// Bound the size of a buffered frame.
    #[must_use]
    pub const fn with_max_frame_len(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.max_frame_len = limit;
        self
    }

    /// Set how many raw chunks the history window retains.
    #[must_use]
    pub const fn with_history_len(mut self, len: usize) -> Self {
        self.history_len = len;
        self
    }
}

impl Default for ReassemblyConfig {
    fn default() -> Self {
        Self {
            frame_marker: DEFAULT_FRAME_MARKER,
            center_marker: DEFAULT_CENTER_MARKER,
            max_frame_len: None,
            history_len: DEFAULT_HISTORY_LEN,
        }
    }
}
