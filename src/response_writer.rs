use crate::{server::HttpMethod, status_code_registry::Status};

/// The response sink handed to handlers. Nothing is sent until the server
/// calls [`ResponseWriter::write`].
#[derive(Debug)]
pub struct ResponseWriter {
    status: Option<Status>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new_empty() -> Self {
        Self {
            status: None,
            headers: vec![],
            body: vec![],
        }
    }

    pub fn get_status_code(&self) -> Option<u16> {
        self.status.map(Status::code)
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    pub fn add_header(&mut self, k: impl Into<String>, v: impl Into<String>) {
        let (k, v) = (k.into(), v.into());
        if let Some(entry) = self
            .headers
            .iter_mut()
            .find(|entry| entry.0.eq_ignore_ascii_case(&k))
        {
            entry.1 = v;
        } else {
            self.headers.push((k, v));
        }
    }

    pub fn get_header(&self, k: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|entry| entry.0.eq_ignore_ascii_case(k))
            .map(|(_, v)| v.as_str())
    }

    pub fn add_allow_header(&mut self, http_methods: &[HttpMethod]) {
        let http_methods = http_methods
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.add_header("Allow", http_methods);
    }

    pub fn get_body(&self) -> &[u8] {
        &self.body
    }

    pub fn set_body(&mut self, body: Vec<u8>, content_type: &str) {
        self.body = body;
        self.add_header("Content-Type", content_type);
    }

    pub fn set_body_str(&mut self, body: &str) {
        self.set_body(body.as_bytes().to_vec(), "text/plain");
    }

    /// Serializes the response. `Content-Length` is always sent so the
    /// connection can be kept alive.
    pub fn write(mut self) -> Vec<u8> {
        let status = self.status.unwrap_or(Status::NotFound);
        self.add_header("Content-Length", self.body.len().to_string());

        let status_line = format!(
            "HTTP/1.1 {} {}\r\n",
            status.code(),
            status.reason_phrase()
        );

        let mut headers = self
            .headers
            .iter()
            .map(|(k, v)| format!("{}: {}\r\n", k, v))
            .collect::<String>();
        headers.push_str("\r\n");

        let mut resp = vec![];
        resp.extend(status_line.bytes());
        resp.extend(headers.bytes());
        resp.extend(self.body);
        resp
    }
}
