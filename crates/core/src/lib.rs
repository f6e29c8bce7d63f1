pub mod address;
pub mod cancel;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod media;
pub mod parent;
pub mod protocol;
pub mod range;
pub mod session;
pub mod source;
pub mod transport;

pub use address::SourceUrl;
pub use cancel::CancelToken;
pub use config::{RangeType, SourceConfig, TlsPolicy};
pub use error::{Result, SetReadyError, SourceError, TransportError};
pub use media::{Format, Media, MediaDescription, MediaKind, RtpPacket};
pub use parent::{SetReadyRequest, StaticSourceParent, StreamSink};
pub use session::SessionState;
pub use source::{RunParams, SOURCE_TYPE, SourceDescriptor, TunnelSource};
pub use transport::{ClientOptions, PacketClock, PacketHandler, TransportHandle, TransportMode};
