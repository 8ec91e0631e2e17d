//! Offline reassembly of captured chunk streams.
//!
//! Reads one chunk per line from a file or standard input, prints every
//! completed frame with its verdict, and finishes with the loss counters.

mod cli;

use std::{error::Error, io, path::Path};

use bytes::Bytes;
use chunkframe::{
    Counters,
    EngineEvent,
    EngineEvents,
    ReassemblyConfig,
    ReassemblyEngine,
    framer::{FrameDecoder, RawFrame},
    metrics,
    stats::Statistics,
    transport::{self, TransportEvent},
    validator::{MessageValidator, ValidationOutcome},
};
use clap::Parser;
use futures::TryStreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::{AnyDelimiterCodec, FramedRead};

type Input = Box<dyn AsyncRead + Unpin + Send>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Applications embedding the library should install their own subscriber.
    tracing_subscriber::fmt::init();

    let cli = cli::Cli::parse();
    serve_metrics(&cli)?;

    let config = ReassemblyConfig::default()
        .with_frame_marker(u8::try_from(cli.frame_marker)?)
        .with_center_marker(u8::try_from(cli.center_marker)?)
        .with_max_frame_len(cli.max_frame_len)
        .with_history_len(cli.history);
    let input = open_input(cli.input.as_deref()).await?;

    let counters = if cli.untagged {
        run_untagged(input, &config).await?
    } else {
        run_tagged(input, config).await?
    };

    println!("chunks {} / {}", counters.total_chunks, counters.bad_chunks);
    println!("frames {} / {}", counters.total_frames, counters.bad_frames);
    Ok(())
}

#[cfg(feature = "metrics")]
fn serve_metrics(cli: &cli::Cli) -> Result<(), Box<dyn Error>> {
    if let Some(addr) = cli.metrics_addr {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()?;
        tracing::info!(%addr, "serving metrics");
    }
    Ok(())
}

#[cfg(not(feature = "metrics"))]
fn serve_metrics(cli: &cli::Cli) -> Result<(), Box<dyn Error>> {
    if cli.metrics_addr.is_some() {
        tracing::warn!("metrics support not compiled in; ignoring --metrics-addr");
    }
    Ok(())
}

async fn open_input(path: Option<&Path>) -> io::Result<Input> {
    Ok(match path {
        Some(path) => Box::new(tokio::fs::File::open(path).await?),
        None => Box::new(tokio::io::stdin()),
    })
}

/// One line per chunk; a blank line marks a reconnect.
async fn run_tagged(input: Input, config: ReassemblyConfig) -> Result<Counters, Box<dyn Error>> {
    let lines = FramedRead::new(input, AnyDelimiterCodec::new(b"\n".to_vec(), b"\n".to_vec()))
        .map_ok(line_event);
    let mut engine = ReassemblyEngine::new(config);
    let counters = transport::drive(&mut engine, lines, report_chunk).await?;
    Ok(counters)
}

fn line_event(mut line: Bytes) -> TransportEvent {
    if line.last() == Some(&b'\r') {
        line.truncate(line.len() - 1);
    }
    if line.is_empty() {
        TransportEvent::Reconnected
    } else {
        TransportEvent::Chunk(line)
    }
}

fn report_chunk(events: EngineEvents) {
    for event in &events {
        match event {
            EngineEvent::SequenceGap {
                expected, found, ..
            } => println!("-- gap: expected {expected}, got {found}"),
            EngineEvent::FrameOverflow { limit } => println!("-- frame over {limit} bytes dropped"),
            EngineEvent::Frame(frame) => report_frame(frame.frame(), frame.outcome()),
            EngineEvent::ChunkProcessed(_) | EngineEvent::Statistics(_) => {}
        }
    }
}

fn report_frame(frame: &RawFrame, outcome: ValidationOutcome) {
    println!("{outcome}: {frame}");
}

/// Raw marker-delimited bytes with no tag bytes, so no chunk accounting.
async fn run_untagged(input: Input, config: &ReassemblyConfig) -> io::Result<Counters> {
    let validator = MessageValidator::new(config);
    let mut stats = Statistics::new();
    let mut frames = FramedRead::new(input, FrameDecoder::new(config));
    while let Some(frame) = frames.try_next().await? {
        let outcome = validator.validate(&frame);
        stats.record_frame(outcome.is_valid());
        metrics::inc_frames(outcome);
        report_frame(&frame, outcome);
    }
    for _ in 0..frames.decoder().overflows() {
        stats.record_discarded_frame();
        metrics::inc_discarded(metrics::DiscardReason::Oversize);
    }
    Ok(stats.snapshot())
}
