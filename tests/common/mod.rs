//! Shared utilities for integration tests.
//!
//! Provides a serialised handle to the global log capture, a deterministic
//! proptest runner, and helpers for building chunk streams.

// Items in this shared module may not be used by all test binaries that import it.
#![allow(
    dead_code,
    reason = "shared test utilities are not used by all test binaries"
)]

use std::sync::{Mutex, MutexGuard, OnceLock};

use bytes::Bytes;
use chunkframe::{ReassemblyConfig, chunker::{Chunker, encode_frame}};
use logtest::Logger;
use proptest::test_runner::{Config as ProptestConfig, RngAlgorithm, TestRng, TestRunner};
use rstest::fixture;

/// Exclusive access to the global [`Logger`].
///
/// Log capture is process-wide, so tests holding this guard run one at a
/// time.
pub struct LoggerHandle {
    guard: MutexGuard<'static, Logger>,
}

impl LoggerHandle {
    /// Acquire the global [`Logger`], draining anything left by earlier tests.
    pub fn new() -> Self {
        static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

        let logger = LOGGER.get_or_init(|| Mutex::new(Logger::start()));
        let mut guard = logger
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        while guard.pop().is_some() {}

        Self { guard }
    }

    /// Drain captured records, returning the messages at `level`.
    pub fn messages_at(&mut self, level: log::Level) -> Vec<String> {
        let mut messages = Vec::new();
        while let Some(record) = self.guard.pop() {
            if record.level() == level {
                messages.push(record.args().to_string());
            }
        }
        messages
    }
}

impl std::ops::Deref for LoggerHandle {
    type Target = Logger;

    fn deref(&self) -> &Self::Target { &self.guard }
}

impl std::ops::DerefMut for LoggerHandle {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.guard }
}

#[allow(
    unused_braces,
    reason = "rustc false positive for single line rstest fixtures"
)]
#[fixture]
pub fn logger() -> LoggerHandle { LoggerHandle::new() }

/// Proptest runner with a fixed seed so failures reproduce.
pub fn deterministic_runner(cases: u32) -> TestRunner {
    let config = ProptestConfig {
        cases,
        ..ProptestConfig::default()
    };
    let rng = TestRng::deterministic_rng(RngAlgorithm::ChaCha);
    TestRunner::new_with_rng(config, rng)
}

/// Encode `bodies` as well-formed frames, close the last one with a trailing
/// marker, and split the result into chunks for `mtu`.
pub fn chunk_frames(config: &ReassemblyConfig, mtu: u16, bodies: &[Vec<u8>]) -> Vec<Bytes> {
    let mut stream = Vec::new();
    for body in bodies {
        stream.extend_from_slice(&encode_frame(config, body));
    }
    stream.push(config.frame_marker);
    Chunker::new(mtu).chunk(&stream)
}
