//! Tunnel session lifecycle.
//!
//! A session lives for exactly one [`TunnelSource::run`](crate::TunnelSource::run)
//! call. Its state only moves forward:
//!
//! ```text
//! Idle -> Connecting -> Negotiating -> Ready -> Streaming -> Terminated
//!                            \____________\________\
//!                                                   -> Cancelling -> Terminated
//! ```
//!
//! The handshake-and-wait sequence in [`Session::run`] executes on the
//! background thread. The foreground run-loop only moves the state to
//! `Connecting`, `Cancelling` and `Terminated`.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::address::SourceUrl;
use crate::config::SourceConfig;
use crate::dispatch::PacketDispatcher;
use crate::error::Result;
use crate::parent::{ReadyGuard, StaticSourceParent};
use crate::range::RangeHeader;
use crate::transport::TransportHandle;

/// Session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No run in progress.
    #[default]
    Idle,
    /// Transport being started.
    Connecting,
    /// Tunnel legs, DESCRIBE and SETUP in progress.
    Negotiating,
    /// Media description announced to the parent.
    Ready,
    /// PLAY accepted, packets flowing.
    Streaming,
    /// Cancellation received, transport being closed.
    Cancelling,
    /// Run finished. A new run starts a new session.
    Terminated,
}

impl SessionState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Idle, Connecting)
                | (Connecting, Negotiating)
                | (Negotiating, Ready)
                | (Ready, Streaming)
                | (Negotiating | Ready | Streaming, Cancelling)
        ) || (next == Terminated && self != Terminated)
    }
}

/// Shared, observable session state.
///
/// Cloned between the foreground run-loop, the background routine and
/// the owning [`TunnelSource`](crate::TunnelSource).
#[derive(Debug, Clone, Default)]
pub struct SessionStatus {
    state: Arc<RwLock<SessionState>>,
}

impl SessionStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> SessionState {
        *self.state.read()
    }

    /// Move to `next` if the transition is legal. Returns whether it was applied.
    ///
    /// Illegal transitions are expected when the background routine races
    /// a cancellation (e.g. reaching `Ready` after `Cancelling`) and are
    /// ignored.
    pub fn set(&self, next: SessionState) -> bool {
        let mut state = self.state.write();
        let old = *state;
        if !old.can_transition_to(next) {
            tracing::trace!(?old, new = ?next, "ignored state transition");
            return false;
        }
        *state = next;
        tracing::debug!(old_state = ?old, new_state = ?next, "state transition");
        true
    }

    /// Start a fresh session.
    pub(crate) fn reset(&self) {
        *self.state.write() = SessionState::Idle;
    }
}

/// Everything the background routine needs for one session.
pub(crate) struct Session<T> {
    pub transport: Arc<T>,
    pub url: SourceUrl,
    pub config: SourceConfig,
    pub parent: Arc<dyn StaticSourceParent>,
    pub status: SessionStatus,
    pub span: tracing::Span,
}

impl<T: TransportHandle> Session<T> {
    /// Run the handshake and block until the stream terminates. The caller
    /// has already moved the status to `Negotiating`.
    ///
    /// Readiness is cleared exactly once on every exit after it was
    /// announced, before this function returns.
    pub fn run(self) -> Result<()> {
        let _enter = self.span.enter();
        let transport = &self.transport;

        transport.tunnel_get(&self.url)?;
        transport.tunnel_post(&self.url)?;

        let (desc, _) = transport.describe(&self.url)?;
        transport.setup_all(&desc.base_url, &desc.medias)?;

        let ready = ReadyGuard::acquire(self.parent.as_ref(), desc.clone())?;
        self.status.set(SessionState::Ready);
        tracing::info!(
            medias = desc.medias.len(),
            formats = desc.format_count(),
            "ready: source is publishing"
        );

        PacketDispatcher::new(&desc, ready.sink().clone()).register(transport);

        let range = RangeHeader::from_config(&self.config)?;
        transport.play(range.as_ref())?;
        self.status.set(SessionState::Streaming);

        transport.wait()?;
        Ok(())
    }
}
