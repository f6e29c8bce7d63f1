use std::sync::Arc;
use std::thread;

use crossbeam::channel::{self, Receiver};
use crossbeam::select;
use serde::Serialize;

use crate::address::SourceUrl;
use crate::cancel::CancelToken;
use crate::config::SourceConfig;
use crate::error::{Result, SourceError};
use crate::events::TracingEvents;
use crate::parent::StaticSourceParent;
use crate::session::{Session, SessionState, SessionStatus};
use crate::transport::{ClientOptions, TransportHandle, TransportMode};

/// Source type reported to the API layer.
pub const SOURCE_TYPE: &str = "rtspTunnelSource";

/// Identification of a source for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// Inputs of one [`TunnelSource::run`].
pub struct RunParams {
    pub config: SourceConfig,
    /// Configuration reload notifications. Drained and ignored: applying a
    /// new configuration requires restarting the source.
    pub reload: Receiver<SourceConfig>,
    pub cancel: CancelToken,
}

/// Static source that pulls a stream through an RTSP-over-HTTP tunnel.
///
/// Each [`run`](Self::run) builds a fresh transport with `new_transport`,
/// performs the handshake on a background thread, announces readiness to
/// the parent and blocks until the stream ends or the run is cancelled.
/// Restarting after a failure is up to the caller.
pub struct TunnelSource<F> {
    parent: Arc<dyn StaticSourceParent>,
    new_transport: F,
    status: SessionStatus,
}

impl<F, T> TunnelSource<F>
where
    F: Fn() -> T,
    T: TransportHandle,
{
    pub fn new(parent: Arc<dyn StaticSourceParent>, new_transport: F) -> Self {
        Self {
            parent,
            new_transport,
            status: SessionStatus::new(),
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.status.get()
    }

    /// Run one session to completion.
    ///
    /// Returns the first fatal error, `Ok(())` when the server closes the
    /// stream cleanly, and `Ok(())` on cancellation regardless of what the
    /// forced close produced internally.
    pub fn run(&self, params: RunParams) -> Result<()> {
        self.status.reset();
        let result = self.run_session(params);
        self.status.set(SessionState::Terminated);
        result
    }

    fn run_session(&self, params: RunParams) -> Result<()> {
        let RunParams {
            config,
            reload,
            cancel,
        } = params;

        config.validate()?;
        let url = SourceUrl::parse(&config.source)?;

        let span = tracing::info_span!("rtsp_tunnel_source", source = %url);
        let _enter = span.enter();
        tracing::debug!("connecting");

        let mut transport = (self.new_transport)();
        transport.configure(ClientOptions {
            transport: TransportMode::Tcp,
            tls: config.tls_policy(),
            read_timeout: config.read_timeout,
            write_timeout: config.write_timeout,
            write_queue_size: config.write_queue_size,
            any_port_enable: config.any_port,
            events: Arc::new(TracingEvents::new()),
        });
        transport.set_tunnel_port(config.tunnel_port()?)?;

        self.status.set(SessionState::Connecting);
        transport.start(url.scheme(), &url.host())?;

        // Set before the spawn so any cancel the loop observes finds an
        // active state to leave.
        self.status.set(SessionState::Negotiating);

        let transport = Arc::new(transport);
        let _close = CloseOnDrop(transport.clone());

        let (done_tx, done_rx) = channel::bounded(1);
        let session = Session {
            transport: transport.clone(),
            url,
            config,
            parent: self.parent.clone(),
            status: self.status.clone(),
            span: span.clone(),
        };
        let worker = thread::Builder::new()
            .name("rtsp-tunnel-session".to_string())
            .spawn(move || {
                let _ = done_tx.send(session.run());
            })?;

        let never = channel::never();
        let cancelled = cancel.done().clone();
        let mut reload_open = true;

        let result = loop {
            let reload_rx = if reload_open {
                reload.clone()
            } else {
                never.clone()
            };

            select! {
                recv(done_rx) -> res => {
                    break res.unwrap_or(Err(SourceError::SessionAborted));
                }
                recv(reload_rx) -> msg => match msg {
                    Ok(_) => tracing::debug!("configuration reload ignored, restart required"),
                    Err(_) => reload_open = false,
                },
                recv(cancelled) -> _ => {
                    self.status.set(SessionState::Cancelling);
                    tracing::info!("cancelled, closing transport");
                    transport.close();
                    if let Ok(Err(err)) = done_rx.recv() {
                        tracing::debug!(error = %err, "session routine exited after close");
                    }
                    break Ok(());
                }
            }
        };

        if worker.join().is_err() {
            tracing::error!("session routine panicked");
        }

        result
    }

    /// Descriptor for the API layer.
    pub fn describe(&self) -> SourceDescriptor {
        SourceDescriptor {
            kind: SOURCE_TYPE.to_string(),
            id: String::new(),
        }
    }
}

/// Closes the transport when the run returns.
struct CloseOnDrop<T: TransportHandle>(Arc<T>);

impl<T: TransportHandle> Drop for CloseOnDrop<T> {
    fn drop(&mut self) {
        self.0.close();
    }
}
