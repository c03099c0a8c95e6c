//! Minimal BVH motion line playback server.
//!
//! `bvhcast` reads a BVH motion-capture file, opens a listening TCP socket
//! and sends each motion line to the connected clients. The delay between
//! the motion lines can be configured or is read from the BVH file. When
//! all motion lines have been sent the server loops back to the first one.
//!
//! Every accepted connection gets its own session with an independent
//! playback cursor, so clients never affect each other's position or
//! pacing. The loaded file and the output format are the only shared
//! state, both read-only; shutdown is a single write-once cancellation
//! signal observed by the acceptor and every session.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bvhcast::{MotionData, OutputFormat, PlaybackServer};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> bvhcast::Result<()> {
//!     let data = Arc::new(MotionData::load("example.bvh")?);
//!     let server = PlaybackServer::bind(7001, data, OutputFormat::Raw, 10_000).await?;
//!     server.run(CancellationToken::new()).await;
//!     Ok(())
//! }
//! ```

pub mod bvh;
pub mod config;
mod error;
pub mod server;
pub mod session;
pub mod wire;

pub use bvh::{MotionCursor, MotionData, extract_frame_time};
pub use config::ServerArgs;
pub use error::{PlaybackError, Result};
pub use server::PlaybackServer;
pub use session::ClientSession;
pub use wire::OutputFormat;
