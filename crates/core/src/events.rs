//! Transport event sink and its logging adapter.
//!
//! The transport reports traffic and advisory conditions through
//! [`ClientEvents`]. None of these affect the session: they are logged
//! and dropped. Packet-loss and decode errors can arrive per packet, so
//! [`TracingEvents`] routes them through a [`LimitedLogger`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::error::TransportError;
use crate::protocol::{Request, Response};

/// Notifications emitted by a transport.
///
/// All methods default to doing nothing.
pub trait ClientEvents: Send + Sync {
    /// A request is about to be written.
    fn on_request(&self, _req: &Request) {}

    /// A response was read.
    fn on_response(&self, _res: &Response) {}

    /// The transport fell back to another lower protocol.
    fn on_transport_switch(&self, _err: &TransportError) {}

    /// RTP packets were lost (sequence gap).
    fn on_packet_lost(&self, _err: &TransportError) {}

    /// A packet could not be decoded.
    fn on_decode_error(&self, _err: &TransportError) {}
}

/// Minimum time between two printed advisory warnings.
pub const DEFAULT_WARNING_INTERVAL: Duration = Duration::from_secs(1);

/// Prints at most one warning per interval.
///
/// Warnings inside the interval are counted, and the count is attached to
/// the next warning that gets printed.
#[derive(Debug)]
pub struct LimitedLogger {
    interval: Duration,
    last_printed: Mutex<Option<Instant>>,
    suppressed: AtomicU64,
}

impl LimitedLogger {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_printed: Mutex::new(None),
            suppressed: AtomicU64::new(0),
        }
    }

    pub fn warn(&self, message: &dyn std::fmt::Display) {
        self.warn_at(Instant::now(), message);
    }

    /// Returns whether the warning was printed.
    fn warn_at(&self, now: Instant, message: &dyn std::fmt::Display) -> bool {
        let mut last = self.last_printed.lock();
        let due = last.is_none_or(|t| now.saturating_duration_since(t) >= self.interval);
        if !due {
            self.suppressed.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        *last = Some(now);
        drop(last);

        let suppressed = self.suppressed.swap(0, Ordering::Relaxed);
        if suppressed > 0 {
            tracing::warn!(suppressed, "{}", message);
        } else {
            tracing::warn!("{}", message);
        }
        true
    }

    /// Warnings dropped since the last printed one.
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }
}

impl Default for LimitedLogger {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_INTERVAL)
    }
}

/// [`ClientEvents`] implementation that writes to `tracing`.
#[derive(Debug, Default)]
pub struct TracingEvents {
    advisory: LimitedLogger,
}

impl TracingEvents {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientEvents for TracingEvents {
    fn on_request(&self, req: &Request) {
        tracing::debug!("[c->s] {}", req);
    }

    fn on_response(&self, res: &Response) {
        tracing::debug!("[s->c] {}", res);
    }

    fn on_transport_switch(&self, err: &TransportError) {
        tracing::warn!("{}", err);
    }

    fn on_packet_lost(&self, err: &TransportError) {
        self.advisory.warn(err);
    }

    fn on_decode_error(&self, err: &TransportError) {
        self.advisory.warn(err);
    }
}
