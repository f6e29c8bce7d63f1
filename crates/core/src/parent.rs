//! Interface to the registry that owns the source.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::error::SetReadyError;
use crate::media::{Format, Media, MediaDescription, RtpPacket};

/// Destination for packets once the source is ready.
pub trait StreamSink: Send + Sync {
    /// Called synchronously, in receipt order per media/format pair.
    ///
    /// `ntp` is the wall-clock time the packet was received; `pts` the
    /// presentation timestamp recovered by the transport.
    fn write_rtp_packet(
        &self,
        media: &Media,
        format: &Format,
        pkt: &RtpPacket,
        ntp: SystemTime,
        pts: Duration,
    );
}

/// Readiness announcement.
#[derive(Debug, Clone)]
pub struct SetReadyRequest {
    pub desc: MediaDescription,
    /// Whether the registry must generate RTP packets from decoded units.
    /// Always `false` here: the transport delivers native RTP.
    pub generate_rtp_packets: bool,
}

/// The registry a static source reports readiness to.
pub trait StaticSourceParent: Send + Sync {
    fn set_ready(&self, req: SetReadyRequest) -> Result<Arc<dyn StreamSink>, SetReadyError>;

    fn set_not_ready(&self);
}

/// Pairs a successful [`StaticSourceParent::set_ready`] with exactly one
/// [`StaticSourceParent::set_not_ready`], issued on drop.
///
/// Drop runs on every exit path after acquisition, including unwinding.
#[must_use = "readiness is cleared as soon as the guard is dropped"]
pub struct ReadyGuard<'a> {
    parent: &'a dyn StaticSourceParent,
    sink: Arc<dyn StreamSink>,
}

impl<'a> ReadyGuard<'a> {
    /// Announce readiness. On error nothing needs to be released.
    pub fn acquire(
        parent: &'a dyn StaticSourceParent,
        desc: MediaDescription,
    ) -> Result<Self, SetReadyError> {
        let sink = parent.set_ready(SetReadyRequest {
            desc,
            generate_rtp_packets: false,
        })?;
        Ok(Self { parent, sink })
    }

    pub fn sink(&self) -> &Arc<dyn StreamSink> {
        &self.sink
    }
}

impl Drop for ReadyGuard<'_> {
    fn drop(&mut self) {
        self.parent.set_not_ready();
        tracing::debug!("source marked not ready");
    }
}
