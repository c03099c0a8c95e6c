//! Per-connection delivery loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWrite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::bvh::{MotionCursor, MotionData};
use crate::error::{PlaybackError, Result};
use crate::wire::{self, OutputFormat};

/// Control loop for one accepted client connection.
///
/// Each session owns a fresh cursor, so it never observes another client's
/// playback position. Termination is always local to the session: end of
/// data, a failed send, or process shutdown close this connection without
/// touching the acceptor or any sibling session.
pub struct ClientSession {
    peer: SocketAddr,
    cursor: MotionCursor,
    format: OutputFormat,
    delay: Duration,
    shutdown: CancellationToken,
}

impl ClientSession {
    /// Create a session for a freshly accepted connection.
    pub fn new(
        data: Arc<MotionData>,
        peer: SocketAddr,
        format: OutputFormat,
        delay_micros: u64,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            peer,
            cursor: MotionCursor::new(data),
            format,
            delay: Duration::from_micros(delay_micros),
            shutdown,
        }
    }

    /// Run the delivery loop until a terminal condition fires.
    ///
    /// Pull a line, send it, sleep the configured delay, repeat. Shutdown
    /// and end-of-data are normal termination; a transmit failure ends the
    /// session without propagating further.
    pub async fn run<S>(mut self, mut stream: S)
    where
        S: AsyncWrite + Unpin,
    {
        debug!("Session for {} started", self.peer);

        match self.stream_lines(&mut stream).await {
            Ok(lines) => debug!("Session for {} ended after {} lines", self.peer, lines),
            Err(error) => debug!("Session for {} ended: {}", self.peer, error),
        }
    }

    async fn stream_lines<S>(&mut self, stream: &mut S) -> Result<u64>
    where
        S: AsyncWrite + Unpin,
    {
        let mut lines = 0u64;

        loop {
            if self.shutdown.is_cancelled() {
                debug!("Session for {} observed shutdown", self.peer);
                break;
            }

            let Some(line) = self.cursor.next_line() else {
                debug!("No motion data for {}", self.peer);
                break;
            };

            trace!("Line {} to {}: {} bytes", lines + 1, self.peer, line.len());

            if let Err(error) = wire::send_line(stream, line, self.format).await {
                return Err(PlaybackError::transmit_error(self.peer, error));
            }
            lines += 1;

            // Fixed pacing: suspend for exactly the configured delay, but
            // wake early when shutdown fires so the session exits within
            // one iteration.
            tokio::select! {
                _ = self.shutdown.cancelled() => {}
                _ = tokio::time::sleep(self.delay) => {}
            }
        }

        Ok(lines)
    }
}
