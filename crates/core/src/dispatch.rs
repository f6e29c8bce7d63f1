//! Bridges transport packets to the registry's stream sink.

use std::sync::{Arc, Weak};
use std::time::SystemTime;

use crate::media::{Format, Media, MediaDescription, RtpPacket};
use crate::parent::StreamSink;
use crate::transport::{PacketClock, TransportHandle};

/// One media/format pair that receives a packet handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub media: Media,
    pub format: Format,
}

/// Registration table built once after negotiation.
///
/// Routes follow description order: every format of the first media, then
/// every format of the second, and so on.
pub struct PacketDispatcher {
    routes: Vec<Route>,
    sink: Arc<dyn StreamSink>,
}

impl PacketDispatcher {
    pub fn new(desc: &MediaDescription, sink: Arc<dyn StreamSink>) -> Self {
        let routes = desc
            .medias
            .iter()
            .flat_map(|media| {
                media.formats.iter().map(move |format| Route {
                    media: media.clone(),
                    format: format.clone(),
                })
            })
            .collect();
        Self { routes, sink }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Register one handler per route on `transport`.
    ///
    /// Handlers hold a weak reference back to the transport for clock
    /// recovery, so registration does not keep the transport alive. The
    /// run drops it on its own thread unless a delivery is in flight; see
    /// [`TransportHandle`] for that case.
    pub fn register<T: TransportHandle>(&self, transport: &Arc<T>) {
        for route in &self.routes {
            let clock: Weak<T> = Arc::downgrade(transport);
            let sink = self.sink.clone();
            let target = route.clone();

            transport.on_packet_rtp(
                &route.media,
                &route.format,
                Box::new(move |pkt: &RtpPacket| {
                    if let Some(clock) = clock.upgrade() {
                        deliver(&*clock, sink.as_ref(), &target, pkt, SystemTime::now());
                    }
                }),
            );
        }
        tracing::debug!(routes = self.routes.len(), "packet handlers registered");
    }
}

/// Forward `pkt` to `sink` if its presentation timestamp can be recovered.
///
/// Packets without a timestamp are expected while the transport's clock
/// state warms up and are dropped silently. Returns whether the packet
/// was forwarded.
pub fn deliver(
    clock: &dyn PacketClock,
    sink: &dyn StreamSink,
    route: &Route,
    pkt: &RtpPacket,
    received_at: SystemTime,
) -> bool {
    let Some(pts) = clock.packet_pts(&route.media, pkt) else {
        return false;
    };
    sink.write_rtp_packet(&route.media, &route.format, pkt, received_at, pts);
    true
}
