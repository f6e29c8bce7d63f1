//! Negotiated media model.
//!
//! A [`MediaDescription`] is produced by the DESCRIBE exchange and stays
//! immutable afterwards. It is announced to the parent registry when the
//! source becomes ready, and drives packet callback registration.
//!
//! ```text
//! MediaDescription (base URL)
//! ├── Media  video  control=trackID=0
//! │   └── Format  96 H264/90000
//! └── Media  audio  control=trackID=1
//!     ├── Format  97 MPEG4-GENERIC/48000/2
//!     └── Format  0  PCMU/8000
//! ```

use std::fmt;

/// Top-level media type from the SDP `m=` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
    Application,
    Other(String),
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => f.write_str("video"),
            Self::Audio => f.write_str("audio"),
            Self::Application => f.write_str("application"),
            Self::Other(kind) => f.write_str(kind),
        }
    }
}

/// One RTP payload format offered by a media entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    /// RTP payload type (RFC 3551).
    pub payload_type: u8,
    /// Encoding name from `a=rtpmap` (e.g. `H264`).
    pub codec: String,
    /// RTP clock rate in Hz.
    pub clock_rate: u32,
    pub channels: Option<u16>,
    /// Codec parameters from `a=fmtp`.
    pub fmtp: Option<String>,
}

impl Format {
    pub fn new(payload_type: u8, codec: &str, clock_rate: u32) -> Self {
        Self {
            payload_type,
            codec: codec.to_string(),
            clock_rate,
            channels: None,
            fmtp: None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.payload_type, self.codec, self.clock_rate)?;
        if let Some(channels) = self.channels {
            write!(f, "/{channels}")?;
        }
        Ok(())
    }
}

/// One media stream (`m=` section) with its formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub kind: MediaKind,
    /// Control attribute, absolute or relative to the description's base URL.
    pub control: String,
    pub formats: Vec<Format>,
}

/// The negotiated set of media streams offered by the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescription {
    /// Base URL that relative media control URLs resolve against.
    pub base_url: String,
    pub medias: Vec<Media>,
}

impl MediaDescription {
    /// Total number of media/format pairs.
    pub fn format_count(&self) -> usize {
        self.medias.iter().map(|m| m.formats.len()).sum()
    }
}

/// RTP packet (RFC 3550 §5.1) as delivered by the transport.
///
/// The transport decodes the wire form; the source forwards packets
/// untouched and reads only what clock recovery needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpPacket {
    pub marker: bool,
    pub payload_type: u8,
    pub sequence_number: u16,
    pub timestamp: u32,
    pub ssrc: u32,
    pub csrc: Vec<u32>,
    /// Header extension: profile-defined identifier and raw data.
    pub extension: Option<(u16, Vec<u8>)>,
    pub payload: Vec<u8>,
}

impl RtpPacket {
    pub fn new(payload_type: u8, sequence_number: u16, timestamp: u32, ssrc: u32) -> Self {
        Self {
            marker: false,
            payload_type,
            sequence_number,
            timestamp,
            ssrc,
            csrc: Vec::new(),
            extension: None,
            payload: Vec::new(),
        }
    }
}
