//! Async event-source adapter
//!
//! Feeds frames from any [`Stream`] into a [`LogStreamSynchronizer`] and
//! fires its timers on the tokio clock. Wall time since the pump started is
//! the synchronizer's millisecond clock.

use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{sleep_until, Instant};

use crate::error::{Error, Result};
use crate::models::Outcome;
use crate::store::KeyValueStore;
use crate::stream::synchronizer::LogStreamSynchronizer;
use crate::timer::Millis;
use crate::ui::LogSink;

/// Summary of one pumped stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// Frames decoded and handed to the synchronizer
    pub accepted: usize,
    /// Frames dropped as malformed
    pub dropped: usize,
    /// Completion fired during this stream
    pub completed: Option<Outcome>,
    /// Virtual time when the last timer settled
    pub elapsed_ms: Millis,
}

fn elapsed_ms(origin: Instant) -> Millis {
    Millis::try_from(origin.elapsed().as_millis()).unwrap_or(Millis::MAX)
}

fn instant_at(origin: Instant, at: Millis) -> Instant {
    origin + Duration::from_millis(at)
}

/// Drive `sync` with `frames` until the stream ends and every pending
/// timer has fired.
///
/// Returns [`Error::StreamClosedEarly`] when the stream ended without a
/// single decodable frame.
pub async fn pump<K, S, F>(sync: &mut LogStreamSynchronizer<K, S>, mut frames: F) -> Result<PumpReport>
where
    K: KeyValueStore,
    S: LogSink,
    F: Stream<Item = String> + Unpin,
{
    let origin = Instant::now();
    let mut report = PumpReport::default();

    loop {
        let deadline = sync.next_deadline();
        tokio::select! {
            frame = frames.next() => {
                let Some(raw) = frame else { break };
                match sync.on_frame(elapsed_ms(origin), &raw) {
                    Some(chunk) => {
                        report.accepted += 1;
                        if let Some(event) = chunk.completed {
                            report.completed = Some(event.outcome);
                        }
                    }
                    None => report.dropped += 1,
                }
            }
            _ = sleep_until(instant_at(origin, deadline.unwrap_or_default())), if deadline.is_some() => {
                sync.tick(elapsed_ms(origin).max(deadline.unwrap_or_default()));
            }
        }
    }

    debug!("Stream ended after {} frames, settling timers", report.accepted);
    while let Some(deadline) = sync.next_deadline() {
        sleep_until(instant_at(origin, deadline)).await;
        sync.tick(elapsed_ms(origin).max(deadline));
    }
    report.elapsed_ms = elapsed_ms(origin);

    if report.accepted == 0 {
        return Err(Error::StreamClosedEarly);
    }
    Ok(report)
}

/// Payload of one line of an event stream.
///
/// Accepts both bare JSON lines and server-sent-event `data:` lines; other
/// event-stream fields, comments and blank lines carry no frame.
pub fn frame_payload(line: &str) -> Option<&str> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() || line.starts_with(':') {
        return None;
    }
    if let Some(data) = line.strip_prefix("data:") {
        return Some(data.strip_prefix(' ').unwrap_or(data));
    }
    if ["event:", "id:", "retry:"].iter().any(|field| line.starts_with(field)) {
        return None;
    }
    Some(line)
}

/// Frames read line by line from `reader`; a read error ends the stream
pub fn frames_from_reader<R>(reader: R) -> impl Stream<Item = String> + Unpin
where
    R: AsyncBufRead + Unpin,
{
    Box::pin(futures::stream::unfold(reader.lines(), |mut lines| async move {
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(frame) = frame_payload(&line) {
                        let frame = frame.to_string();
                        return Some((frame, lines));
                    }
                }
                Ok(None) => return None,
                Err(e) => {
                    warn!("Event stream read failed: {}", e);
                    return None;
                }
            }
        }
    }))
}
