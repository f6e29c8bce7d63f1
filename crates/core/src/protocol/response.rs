use std::fmt;

/// An RTSP (or tunnel HTTP) response (RFC 2326 §7).
///
/// ```text
/// RTSP/1.0 200 OK\r\n
/// CSeq: 1\r\n
/// Content-Type: application/sdp\r\n
/// Content-Length: 142\r\n
/// \r\n
/// v=0\r\n...
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// `RTSP/1.0` or `HTTP/1.0`.
    pub version: String,
    pub status_code: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Response {
    pub fn new(status_code: u16, status_text: &str) -> Self {
        Response {
            version: "RTSP/1.0".to_string(),
            status_code,
            status_text: status_text.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// 200 OK.
    pub fn ok() -> Self {
        Self::new(200, "OK")
    }

    pub fn add_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a header value by name (case-insensitive, per RFC 2326 §4.2).
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}\r\n",
            self.version, self.status_code, self.status_text
        )?;

        let has_length = self.get_header("Content-Length").is_some();
        for (name, value) in &self.headers {
            write!(f, "{}: {}\r\n", name, value)?;
        }

        match &self.body {
            Some(body) if !has_length => {
                write!(f, "Content-Length: {}\r\n\r\n{}", body.len(), body)
            }
            Some(body) => write!(f, "\r\n{}", body),
            None => f.write_str("\r\n"),
        }
    }
}
