//! Reassembly of marker-delimited frames from tagged BLE notification chunks.
//!
//! A peripheral streams frames of the form `#` + body + `_` + body, split
//! across small notifications. Each notification carries a one-byte rolling
//! sequence tag (`a`..=`p`) followed by payload bytes. This crate detects
//! lost or reordered chunks, rebuilds frames across chunk boundaries, checks
//! each frame's mirrored halves, and keeps loss counters.
//!
//! [`ReassemblyEngine`] ties the pieces together. The transport side lives in
//! [`transport`], and [`chunker`] produces chunk streams for tests and
//! simulations.

pub mod chunker;
pub mod config;
pub mod engine;
pub mod error;
pub mod framer;
pub mod history;
pub mod metrics;
pub mod sequence;
pub mod stats;
pub mod tag;
pub mod transport;
pub mod validator;

pub use config::ReassemblyConfig;
pub use engine::{ChunkProcessed, EngineEvent, EngineEvents, FrameEvent, ReassemblyEngine};
pub use error::InvalidChunk;
pub use framer::RawFrame;
pub use stats::Counters;
pub use tag::SequenceTag;
pub use validator::ValidationOutcome;
