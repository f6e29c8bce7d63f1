use std::fmt;
use std::time::Duration;

use crate::error::{Result, SourceError};

/// Kind of playback range requested on PLAY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeType {
    /// No `Range` header is sent.
    #[default]
    Undefined,
    /// Absolute UTC wall-clock start (`clock=`).
    Clock,
    /// Normal play time offset (`npt=`).
    Npt,
    /// SMPTE timecode offset (`smpte=`).
    Smpte,
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Undefined => "undefined",
            Self::Clock => "clock",
            Self::Npt => "npt",
            Self::Smpte => "smpte",
        })
    }
}

/// Configuration of one tunnel source run.
///
/// Owned by the caller and read-only for the duration of a run. A changed
/// configuration only takes effect when the caller restarts the source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Source address (`rtsp://` or `rtsps://`).
    pub source: String,
    /// HTTP port the RTSP-over-HTTP tunnel is opened on.
    pub tunnel_port: u32,
    /// Read deadline applied by the transport to each operation.
    pub read_timeout: Duration,
    /// Write deadline applied by the transport to each operation.
    pub write_timeout: Duration,
    /// Outbound queue capacity. Must be a power of two.
    pub write_queue_size: usize,
    /// SHA-256 fingerprint (hex) of the server certificate, for `rtsps`.
    pub fingerprint: Option<String>,
    /// Accept media from any remote port.
    pub any_port: bool,
    /// Playback range kind requested on PLAY.
    pub range_type: RangeType,
    /// Playback range start, interpreted according to `range_type`.
    pub range_start: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            source: String::new(),
            tunnel_port: 80,
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(10),
            write_queue_size: 512,
            fingerprint: None,
            any_port: false,
            range_type: RangeType::Undefined,
            range_start: String::new(),
        }
    }
}

impl SourceConfig {
    /// Create a configuration for `source` with default settings.
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Self::default()
        }
    }

    /// Check the settings that must be valid before a transport is built.
    pub fn validate(&self) -> Result<()> {
        self.tunnel_port()?;
        if !self.write_queue_size.is_power_of_two() {
            return Err(SourceError::InvalidWriteQueueSize(self.write_queue_size));
        }
        Ok(())
    }

    /// Tunnel port as a TCP port number (`1..=65535`).
    pub fn tunnel_port(&self) -> Result<u16> {
        u16::try_from(self.tunnel_port)
            .ok()
            .filter(|port| *port != 0)
            .ok_or(SourceError::InvalidTunnelPort(self.tunnel_port))
    }

    /// TLS verification policy derived from [`fingerprint`](Self::fingerprint).
    pub fn tls_policy(&self) -> TlsPolicy {
        TlsPolicy::for_fingerprint(self.fingerprint.as_deref().unwrap_or(""))
    }
}

/// How the transport verifies the server certificate on `rtsps` sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsPolicy {
    /// Regular certificate chain verification.
    Default,
    /// Skip chain verification and accept only the certificate whose
    /// SHA-256 digest matches this lowercase hex string.
    Fingerprint(String),
}

impl TlsPolicy {
    /// An empty fingerprint selects [`TlsPolicy::Default`].
    pub fn for_fingerprint(fingerprint: &str) -> Self {
        let fingerprint = fingerprint.trim();
        if fingerprint.is_empty() {
            Self::Default
        } else {
            Self::Fingerprint(fingerprint.to_lowercase())
        }
    }
}
