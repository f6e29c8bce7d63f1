use std::fmt;

/// An outbound RTSP (or tunnel HTTP) request.
///
/// Renders to the standard text format via `Display`:
///
/// ```text
/// DESCRIBE rtsp://server/stream RTSP/1.0\r\n
/// CSeq: 2\r\n
/// \r\n
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    /// Request-URI (absolute for RTSP, path for tunnel legs).
    pub uri: String,
    /// `RTSP/1.0` or `HTTP/1.0`.
    pub version: String,
    /// Headers as ordered (name, value) pairs.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Request {
    /// An RTSP/1.0 request.
    pub fn new(method: &str, uri: &str) -> Self {
        Request {
            method: method.to_string(),
            uri: uri.to_string(),
            version: "RTSP/1.0".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn add_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_cseq(self, cseq: u32) -> Self {
        self.add_header("CSeq", &cseq.to_string())
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method, self.uri, self.version)?;
        for (name, value) in &self.headers {
            write!(f, "{}: {}\r\n", name, value)?;
        }
        match &self.body {
            Some(body) => write!(f, "Content-Length: {}\r\n\r\n{}", body.len(), body),
            None => f.write_str("\r\n"),
        }
    }
}
