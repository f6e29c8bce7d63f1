//! Error types for the RTSP tunnel source.

use crate::config::RangeType;

/// Errors that end a source run.
///
/// Variants map to the stage that produced them:
///
/// - **Configuration**: [`InvalidTunnelPort`](Self::InvalidTunnelPort),
///   [`InvalidWriteQueueSize`](Self::InvalidWriteQueueSize),
///   [`InvalidUrl`](Self::InvalidUrl),
///   [`UnsupportedScheme`](Self::UnsupportedScheme). Returned before any
///   background work starts.
/// - **Handshake / streaming**: [`Transport`](Self::Transport),
///   [`Ready`](Self::Ready), [`InvalidRange`](Self::InvalidRange).
/// - **Plumbing**: [`Io`](Self::Io), [`SessionAborted`](Self::SessionAborted).
///
/// Cancellation is never reported through this type.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Tunnel port outside `1..=65535`.
    #[error("invalid tunnel port: {0}")]
    InvalidTunnelPort(u32),

    /// Outbound queue capacity that is zero or not a power of two.
    #[error("write queue size must be a power of two, got {0}")]
    InvalidWriteQueueSize(usize),

    /// The source address could not be parsed.
    #[error("invalid source URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The source address uses a scheme other than `rtsp` or `rtsps`.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// The configured playback range start could not be parsed.
    #[error("invalid {kind} range start '{value}': {reason}")]
    InvalidRange {
        kind: RangeType,
        value: String,
        reason: String,
    },

    /// A transport operation failed (handshake, playback or the final wait).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The parent registry refused to mark the source ready.
    #[error(transparent)]
    Ready(#[from] SetReadyError),

    /// The background session thread could not be spawned.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The background session routine exited without reporting a result.
    #[error("session routine exited without a result")]
    SessionAborted,
}

/// Errors reported by a [`TransportHandle`](crate::transport::TransportHandle).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Underlying socket failure (connection refused, reset, timeout).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered a request with a non-2xx status.
    #[error("bad status code: {code} ({message})")]
    BadStatus { code: u16, message: String },

    /// Unexpected protocol data (bad SDP, missing headers).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The handle was closed while an operation was in flight.
    #[error("terminated")]
    Terminated,

    /// The server certificate does not match the pinned
    /// [`TlsPolicy::Fingerprint`](crate::config::TlsPolicy::Fingerprint).
    #[error("source fingerprint does not match: expected {expected}, got {actual}")]
    FingerprintMismatch { expected: String, actual: String },
}

/// Reason the parent registry gave for refusing readiness.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct SetReadyError(pub String);

/// Convenience alias for `Result<T, SourceError>`.
pub type Result<T> = std::result::Result<T, SourceError>;
