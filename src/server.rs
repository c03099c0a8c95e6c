//! Listener lifecycle and session spawning.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::bvh::MotionData;
use crate::error::{PlaybackError, Result};
use crate::session::ClientSession;
use crate::wire::OutputFormat;

/// The listening socket plus everything sessions share: the loaded motion
/// buffer, the output format, and the inter-line delay.
pub struct PlaybackServer {
    listener: TcpListener,
    data: Arc<MotionData>,
    format: OutputFormat,
    delay_micros: u64,
}

impl PlaybackServer {
    /// Bind the listening socket on all interfaces.
    pub async fn bind(
        port: u16,
        data: Arc<MotionData>,
        format: OutputFormat,
        delay_micros: u64,
    ) -> Result<Self> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| PlaybackError::socket_error("bind", e))?;

        info!("Listening on {} ({:?}, {} us per line)", addr, format, delay_micros);

        Ok(Self { listener, data, format, delay_micros })
    }

    /// The bound address; useful when the port was 0.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().map_err(|e| PlaybackError::socket_error("local_addr", e))
    }

    /// Accept connections until shutdown, one independent session per
    /// client.
    ///
    /// Sessions run in their own tasks, so a slow or stalled client never
    /// delays the accept loop or another session. A failed accept is logged
    /// and tolerated. On shutdown the listening socket is released first,
    /// then running sessions drain on their own next iteration — nothing is
    /// severed mid-check.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut sessions = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested, no longer accepting connections");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        info!("Client connected from {}", peer);
                        let session = ClientSession::new(
                            Arc::clone(&self.data),
                            peer,
                            self.format,
                            self.delay_micros,
                            shutdown.clone(),
                        );
                        sessions.spawn(session.run(stream));
                    }
                    Err(error) => {
                        warn!("Failed to accept connection: {}", error);
                    }
                }
            }
        }

        drop(self.listener);

        while let Some(joined) = sessions.join_next().await {
            if let Err(error) = joined {
                debug!("Session task did not finish cleanly: {}", error);
            }
        }
        info!("All sessions drained");
    }
}
