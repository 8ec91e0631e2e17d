//! Log output emitted while reassembling.

mod common;

use std::num::NonZeroUsize;

use bytes::BytesMut;
use chunkframe::{ReassemblyConfig, ReassemblyEngine, framer::FrameDecoder};
use common::{LoggerHandle, logger};
use log::Level;
use rstest::rstest;
use tokio_util::codec::Decoder;

#[rstest]
fn invalid_frames_are_logged_with_outcome(mut logger: LoggerHandle) {
    let mut engine = ReassemblyEngine::default();
    engine.process_chunk(b"a#AB_XY").expect("chunk decodes");
    engine.process_chunk(b"b#CD_CD").expect("chunk decodes");

    let warnings = logger.messages_at(Level::Warn);
    assert_eq!(warnings.len(), 1, "unexpected warnings: {warnings:?}");
    assert!(warnings[0].contains("invalid frame"));
    assert!(warnings[0].contains("outcome=halves_mismatch"));
    assert!(warnings[0].contains("frame=#AB_XY"));
}

#[rstest]
fn sequence_gaps_are_logged(mut logger: LoggerHandle) {
    let mut engine = ReassemblyEngine::default();
    engine.process_chunk(b"a#AB_").expect("chunk decodes");
    engine.process_chunk(b"dAB#").expect("chunk decodes");

    let warnings = logger.messages_at(Level::Warn);
    assert!(
        warnings
            .iter()
            .any(|m| m.contains("sequence gap") && m.contains("expected=1") && m.contains("found=3")),
        "gap warning not found: {warnings:?}"
    );
    assert!(warnings.iter().any(|m| m.contains("discarded=4")));
}

#[rstest]
fn undecodable_chunks_are_logged(mut logger: LoggerHandle) {
    let mut engine = ReassemblyEngine::default();
    assert!(engine.process_chunk(b"").is_err());
    assert!(engine.process_chunk(b"Z#A_A").is_err());

    let warnings = logger.messages_at(Level::Warn);
    assert!(warnings.iter().any(|m| m.contains("dropping empty chunk")));
    assert!(
        warnings
            .iter()
            .any(|m| m.contains("dropping undecodable chunk") && m.contains("0x5a")),
        "undecodable warning not found: {warnings:?}"
    );
}

#[rstest]
fn in_order_traffic_is_quiet(mut logger: LoggerHandle) {
    let mut engine = ReassemblyEngine::default();
    for chunk in [&b"a#A_A"[..], b"b#B_B", b"c#"] {
        engine.process_chunk(chunk).expect("chunk decodes");
    }
    assert!(logger.messages_at(Level::Warn).is_empty());
}

#[rstest]
fn decoder_logs_skipped_frames(mut logger: LoggerHandle) {
    let config = ReassemblyConfig::default().with_max_frame_len(NonZeroUsize::new(4));
    let mut decoder = FrameDecoder::new(&config);
    let mut buf = BytesMut::from(&b"#TOOLONG#A_A#"[..]);
    let frame = decoder
        .decode(&mut buf)
        .expect("decoding never fails")
        .expect("short frame follows");
    assert_eq!(frame.as_bytes(), b"#A_A");

    let warnings = logger.messages_at(Level::Warn);
    assert!(
        warnings
            .iter()
            .any(|m| m.contains("skipping oversize frame") && m.contains("len=8")),
        "oversize warning not found: {warnings:?}"
    );
}
