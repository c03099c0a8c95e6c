//! Error types for BVH playback.
//!
//! All startup failures (unreadable file, missing frame time declaration,
//! socket bind/listen problems) are fatal to the whole process. A transmit
//! failure is local to the session that hit it: the session closes its
//! connection and ends while the acceptor and every other session keep
//! running. End-of-data is not an error at all — the cursor reports it as
//! the absence of a line.
//!
//! ## Helper Constructors
//!
//! Use helper methods for common error scenarios:
//!
//! ```rust
//! use bvhcast::PlaybackError;
//! use std::path::PathBuf;
//!
//! let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
//! let file_error = PlaybackError::file_error(PathBuf::from("/path/to/walk.bvh"), io_err);
//! assert!(file_error.is_fatal());
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for playback operations.
pub type Result<T, E = PlaybackError> = std::result::Result<T, E>;

/// Main error type for the playback server.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlaybackError {
    #[error("BVH file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Socket error during {operation}")]
    Socket {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Transmit error to {peer}")]
    Transmit {
        peer: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

impl PlaybackError {
    /// Returns whether this error must take down the whole process.
    ///
    /// File, parse, and socket errors only occur during startup and are
    /// fatal. A transmit error ends exactly one session.
    pub fn is_fatal(&self) -> bool {
        match self {
            PlaybackError::File { .. } => true,
            PlaybackError::Parse { .. } => true,
            PlaybackError::Socket { .. } => true,
            PlaybackError::Transmit { .. } => false,
        }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        PlaybackError::File { path, source }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        PlaybackError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for socket errors.
    pub fn socket_error(operation: impl Into<String>, source: std::io::Error) -> Self {
        PlaybackError::Socket { operation: operation.into(), source }
    }

    /// Helper constructor for transmit errors.
    pub fn transmit_error(peer: SocketAddr, source: std::io::Error) -> Self {
        PlaybackError::Transmit { peer, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, SocketAddr};
    use std::path::PathBuf;

    fn io_err(message: &str) -> std::io::Error {
        std::io::Error::other(message.to_string())
    }

    fn peer() -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, 40123))
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn error_messages_contain_their_context(
                context in "\\w+",
                details in "\\w+",
                operation in "\\w+"
            ) {
                let parse = PlaybackError::parse_error(context.clone(), details.clone());
                let parse_msg = parse.to_string();
                prop_assert!(parse_msg.contains(&context));
                prop_assert!(parse_msg.contains(&details));

                let socket = PlaybackError::socket_error(operation.clone(), io_err("boom"));
                prop_assert!(socket.to_string().contains(&operation));

                // No error message should be empty
                prop_assert!(!parse_msg.is_empty());
                prop_assert!(!socket.to_string().is_empty());
            }

            #[test]
            fn fatality_never_depends_on_message_content(
                context in ".*",
                details in ".*"
            ) {
                prop_assert!(PlaybackError::parse_error(context, details).is_fatal());
                prop_assert!(!PlaybackError::transmit_error(peer(), io_err("reset")).is_fatal());
            }
        }
    }

    #[test]
    fn error_constructors_validation() {
        let file_error = PlaybackError::file_error(PathBuf::from("/test.bvh"), io_err("missing"));
        assert!(matches!(file_error, PlaybackError::File { .. }));

        let parse_error = PlaybackError::parse_error("frame time", "marker not found");
        assert!(matches!(parse_error, PlaybackError::Parse { .. }));

        let socket_error = PlaybackError::socket_error("bind", io_err("in use"));
        assert!(matches!(socket_error, PlaybackError::Socket { .. }));

        let transmit_error = PlaybackError::transmit_error(peer(), io_err("broken pipe"));
        assert!(matches!(transmit_error, PlaybackError::Transmit { .. }));
    }

    #[test]
    fn error_traits_validation() {
        // Compile-time check: PlaybackError must be Send + Sync + 'static
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<PlaybackError>();

        let error = PlaybackError::parse_error("frame time", "no digits");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn fatality_matches_propagation_policy() {
        // Startup errors end the process; a transmit error ends one session.
        assert!(PlaybackError::file_error(PathBuf::from("/x.bvh"), io_err("denied")).is_fatal());
        assert!(PlaybackError::parse_error("frame time", "no digits").is_fatal());
        assert!(PlaybackError::socket_error("listen", io_err("in use")).is_fatal());
        assert!(!PlaybackError::transmit_error(peer(), io_err("reset")).is_fatal());
    }

    #[test]
    fn source_chain_preserves_io_error() {
        let error = PlaybackError::socket_error("bind", io_err("address in use"));
        let source = std::error::Error::source(&error).expect("socket error carries a source");
        assert_eq!(source.to_string(), "address in use");
    }
}
