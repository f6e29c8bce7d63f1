//! Source address parsing.

use std::fmt;

use url::Url;

use crate::error::{Result, SourceError};

/// A parsed `rtsp://` or `rtsps://` source address.
///
/// `Display` masks the password so the address can be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl {
    inner: Url,
}

impl SourceUrl {
    pub fn parse(raw: &str) -> Result<Self> {
        let inner = Url::parse(raw).map_err(|e| SourceError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        match inner.scheme() {
            "rtsp" | "rtsps" => {}
            other => return Err(SourceError::UnsupportedScheme(other.to_string())),
        }

        if inner.host_str().is_none_or(str::is_empty) {
            return Err(SourceError::InvalidUrl {
                url: raw.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self { inner })
    }

    pub fn scheme(&self) -> &str {
        self.inner.scheme()
    }

    /// Host with the explicit port, if any (`camera.local:8554`).
    pub fn host(&self) -> String {
        let host = self.inner.host_str().unwrap_or_default();
        match self.inner.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    pub fn port(&self) -> Option<u16> {
        self.inner.port()
    }

    pub fn path(&self) -> &str {
        self.inner.path()
    }

    pub fn username(&self) -> &str {
        self.inner.username()
    }

    pub fn password(&self) -> Option<&str> {
        self.inner.password()
    }

    /// Full address, credentials included.
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.password().is_some() {
            let mut masked = self.inner.clone();
            let _ = masked.set_password(Some("xxxxx"));
            write!(f, "{masked}")
        } else {
            write!(f, "{}", self.inner)
        }
    }
}
