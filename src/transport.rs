//! Drive a [`ReassemblyEngine`] from an asynchronous transport.
//!
//! Transports deliver [`TransportEvent`]s: a chunk per notification, and a
//! [`TransportEvent::Reconnected`] marker whenever the link starts a new
//! session. [`drive`] feeds chunks to the engine in arrival order, resets it
//! on reconnect, and hands every chunk's events to a sink.

use bytes::Bytes;
use futures::{Stream, TryStreamExt};

use crate::{
    engine::{EngineEvents, ReassemblyEngine},
    stats::Counters,
};

/// Something observed on the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    /// One notification payload, tag byte first.
    Chunk(Bytes),
    /// The link was re-established; earlier state belongs to a dead session.
    Reconnected,
}

/// Consume `events` until the stream ends, returning the final counters.
///
/// Undecodable chunks are logged and skipped; the engine has already counted
/// them. Each successfully processed chunk's events are passed to `sink`.
///
/// # Errors
///
/// Returns the first error yielded by `events`. The engine keeps whatever
/// state it had reached, so the caller may inspect or resume it.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use chunkframe::{
///     ReassemblyEngine,
///     transport::{TransportEvent, drive},
/// };
/// use futures::stream;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let events = stream::iter([
///     Ok::<_, std::io::Error>(TransportEvent::Chunk(Bytes::from_static(b"a#AB_AB"))),
///     Ok(TransportEvent::Chunk(Bytes::from_static(b"b#"))),
/// ]);
/// let mut engine = ReassemblyEngine::default();
/// let mut frames = 0;
/// let counters = drive(&mut engine, events, |events| frames += events.frames().count())
///     .await
///     .expect("stream never fails");
/// assert_eq!(frames, 1);
/// assert_eq!(counters.total_frames, 1);
/// # }
/// ```
pub async fn drive<S, E, F>(
    engine: &mut ReassemblyEngine,
    events: S,
    mut sink: F,
) -> Result<Counters, E>
where
    S: Stream<Item = Result<TransportEvent, E>>,
    F: FnMut(EngineEvents),
{
    futures::pin_mut!(events);
    while let Some(event) = events.try_next().await? {
        match event {
            TransportEvent::Chunk(chunk) => match engine.process_chunk(&chunk) {
                Ok(processed) => sink(processed),
                Err(err) if err.is_counted() => {
                    tracing::warn!(error = %err, len = chunk.len(), "skipping chunk");
                }
                Err(err) => tracing::debug!(error = %err, "skipping chunk"),
            },
            TransportEvent::Reconnected => {
                let before = engine.snapshot_statistics();
                engine.reset();
                tracing::info!(
                    chunks = before.total_chunks,
                    frames = before.total_frames,
                    "transport reconnected, session reset"
                );
            }
        }
    }
    Ok(engine.snapshot_statistics())
}

#[cfg(test)]
mod tests {
    use std::io;

    use futures::stream;
    use rstest::rstest;
    use tracing_test::traced_test;

    use super::*;

    fn chunk(bytes: &'static [u8]) -> Result<TransportEvent, io::Error> {
        Ok(TransportEvent::Chunk(Bytes::from_static(bytes)))
    }

    #[rstest]
    #[tokio::test]
    async fn forwards_events_for_each_chunk() {
        let mut engine = ReassemblyEngine::default();
        let mut seen = Vec::new();
        let events = stream::iter([chunk(b"a#A_A"), chunk(b"b#B_"), chunk(b"cB#")]);

        let counters = drive(&mut engine, events, |events| seen.push(events.chunk().tag.get()))
            .await
            .expect("stream ok");

        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(counters.total_chunks, 3);
        assert_eq!(counters.total_frames, 2);
        assert_eq!(counters.bad_frames, 0);
    }

    #[rstest]
    #[traced_test]
    #[tokio::test]
    async fn reconnect_resets_the_engine() {
        let mut engine = ReassemblyEngine::default();
        let events = stream::iter([
            chunk(b"a#A_A"),
            chunk(b"b#B_"),
            Ok(TransportEvent::Reconnected),
            chunk(b"f#C_C"),
            chunk(b"g#"),
        ]);

        let counters = drive(&mut engine, events, |_| {}).await.expect("stream ok");

        assert_eq!(counters.total_chunks, 2);
        assert_eq!(counters.bad_chunks, 0);
        assert_eq!(counters.total_frames, 1);
        assert!(logs_contain("transport reconnected, session reset"));
    }

    #[rstest]
    #[traced_test]
    #[tokio::test]
    async fn undecodable_chunks_are_skipped() {
        let mut engine = ReassemblyEngine::default();
        let mut delivered = 0;
        let events = stream::iter([chunk(b"a#A_A"), chunk(b""), chunk(b"!junk"), chunk(b"b#")]);

        let counters = drive(&mut engine, events, |_| delivered += 1)
            .await
            .expect("stream ok");

        assert_eq!(delivered, 2);
        assert_eq!(counters.total_chunks, 3);
        assert_eq!(counters.bad_chunks, 1);
        logs_assert(|lines: &[&str]| {
            let skipped = lines.iter().filter(|line| line.contains("skipping chunk")).count();
            if skipped == 2 {
                Ok(())
            } else {
                Err(format!("expected 2 skipped chunks, found {skipped}"))
            }
        });
    }

    #[tokio::test]
    async fn stream_error_is_returned() {
        let mut engine = ReassemblyEngine::default();
        let events = stream::iter([
            chunk(b"a#A_"),
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "link lost")),
            chunk(b"bA#"),
        ]);

        let err = drive(&mut engine, events, |_| {})
            .await
            .expect_err("error surfaces");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(engine.snapshot_statistics().total_chunks, 1);
        assert!(engine.has_partial_frame());
    }
}
