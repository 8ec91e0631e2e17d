//! Command line interface for the `chunkframe` binary.
//!
//! Kept free of crate-internal types so the build script can include it to
//! render the manual page.

use std::{net::SocketAddr, num::NonZeroUsize, path::PathBuf};

use clap::Parser;

/// Command line arguments for the `chunkframe` binary.
///
/// Input holds one chunk per line, tag byte first. An empty line marks a
/// reconnect and starts a new session.
#[derive(Debug, Parser)]
#[command(
    name = "chunkframe",
    version,
    about = "Reassemble and validate frames from tagged BLE notification chunks"
)]
pub struct Cli {
    /// Read chunks from this file instead of standard input.
    pub input: Option<PathBuf>,

    /// Byte that starts every frame.
    #[arg(long, default_value_t = '#')]
    pub frame_marker: char,

    /// Byte expected between the two halves of a frame.
    #[arg(long, default_value_t = '_')]
    pub center_marker: char,

    /// Discard frames longer than this many bytes.
    #[arg(long)]
    pub max_frame_len: Option<NonZeroUsize>,

    /// Number of recent chunks to keep for diagnostics.
    #[arg(long, default_value_t = 16)]
    pub history: usize,

    /// Treat input as a raw byte stream without tag bytes.
    #[arg(long)]
    pub untagged: bool,

    /// Serve Prometheus metrics on this address.
    #[arg(long)]
    pub metrics_addr: Option<SocketAddr>,
}
