//! Interface to the RTSP-over-HTTP wire engine.
//!
//! The session controller never touches sockets. It drives an
//! implementation of [`TransportHandle`] through a fixed lifecycle:
//!
//! ```text
//! configure → set_tunnel_port → start          (&mut self, foreground)
//!     ↓ moved into Arc
//! tunnel_get → tunnel_post → describe → setup_all
//!   → on_packet_rtp (per media/format) → play → wait   (background thread)
//! close                                         (any thread, idempotent)
//! ```
//!
//! Implementations deliver packets on their own reader thread and must
//! invoke each registered handler serially for a given media/format pair.

use std::sync::Arc;
use std::time::Duration;

use crate::address::SourceUrl;
use crate::config::TlsPolicy;
use crate::error::TransportError;
use crate::events::ClientEvents;
use crate::media::{Format, Media, MediaDescription, RtpPacket};
use crate::protocol::Response;
use crate::range::RangeHeader;

/// Lower transport protocol for media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Udp,
    UdpMulticast,
    /// Interleaved in the control connection. The only mode a tunnel can use.
    Tcp,
}

/// Settings applied to a transport before it is started.
#[derive(Clone)]
pub struct ClientOptions {
    pub transport: TransportMode,
    pub tls: TlsPolicy,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub write_queue_size: usize,
    pub any_port_enable: bool,
    /// Receiver for request/response/advisory notifications.
    pub events: Arc<dyn ClientEvents>,
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("transport", &self.transport)
            .field("tls", &self.tls)
            .field("read_timeout", &self.read_timeout)
            .field("write_timeout", &self.write_timeout)
            .field("write_queue_size", &self.write_queue_size)
            .field("any_port_enable", &self.any_port_enable)
            .finish_non_exhaustive()
    }
}

/// Callback invoked by the transport for each RTP packet of one media/format.
pub type PacketHandler = Box<dyn Fn(&RtpPacket) + Send + Sync>;

/// Clock recovery: maps an RTP packet to its presentation timestamp.
pub trait PacketClock {
    /// `None` while the transport has not yet gathered enough clock state
    /// (e.g. before the first RTCP sender report or RTP-Info).
    fn packet_pts(&self, media: &Media, pkt: &RtpPacket) -> Option<Duration>;
}

/// One negotiated client connection.
///
/// `close` must be safe to call from another thread while `wait` (or any
/// handshake call) is blocked, must make that call return promptly with
/// [`TransportError::Terminated`] or another error, and must be idempotent.
///
/// Packet handlers reach the transport through a `Weak` reference and
/// upgrade it while a packet is delivered. If the run returns during that
/// delivery, the last strong reference is released on the delivery thread,
/// so `Drop` must not join that thread.
pub trait TransportHandle: PacketClock + Send + Sync + 'static {
    fn configure(&mut self, options: ClientOptions);

    fn set_tunnel_port(&mut self, port: u16) -> Result<(), TransportError>;

    /// Bind and connect to `host` using `scheme` (`rtsp` or `rtsps`).
    fn start(&mut self, scheme: &str, host: &str) -> Result<(), TransportError>;

    /// Open the server-to-client tunnel leg.
    fn tunnel_get(&self, url: &SourceUrl) -> Result<Response, TransportError>;

    /// Open the client-to-server tunnel leg. Requires `tunnel_get` first.
    fn tunnel_post(&self, url: &SourceUrl) -> Result<Response, TransportError>;

    fn describe(&self, url: &SourceUrl) -> Result<(MediaDescription, Response), TransportError>;

    /// SETUP every media; fails on the first rejected one.
    fn setup_all(&self, base_url: &str, medias: &[Media]) -> Result<(), TransportError>;

    fn on_packet_rtp(&self, media: &Media, format: &Format, handler: PacketHandler);

    fn play(&self, range: Option<&RangeHeader>) -> Result<Response, TransportError>;

    /// Block until the connection terminates. `Ok` means a clean close by
    /// the server.
    fn wait(&self) -> Result<(), TransportError>;

    fn close(&self);
}
