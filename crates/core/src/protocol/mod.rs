//! RTSP messages as seen by the event sink.
//!
//! The wire engine behind [`TransportHandle`](crate::transport::TransportHandle)
//! builds, sends and parses these itself. This crate only needs their text
//! form, to log traffic through [`ClientEvents`](crate::events::ClientEvents).
//!
//! | Method | RFC 2326 section | Purpose |
//! |--------|------------------|---------|
//! | DESCRIBE | §10.2 | Retrieve SDP session description |
//! | SETUP | §10.4 | Negotiate transport per media |
//! | PLAY | §10.5 | Start media delivery |

pub mod request;
pub mod response;

pub use request::Request;
pub use response::Response;
