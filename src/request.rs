use std::{
    collections::HashMap,
    io::{BufRead, BufReader, ErrorKind, Read, Take},
};

use thiserror::Error;
use tracing::debug;

const REQUEST_LINE_LIMIT: u64 = 1024;
const HEADERS_LIMIT: u64 = 8 * 1024;
const BODY_LIMIT: usize = 64 * 1024;

#[derive(Debug)]
struct RequestLine<'a> {
    line: &'a str,
}

impl<'a> RequestLine<'a> {
    fn new(line: &'a str) -> Self {
        Self { line }
    }

    fn part(&self, idx: usize) -> &'a str {
        self.line.split(' ').nth(idx).unwrap_or("")
    }

    fn http_method(&self) -> &'a str {
        self.part(0)
    }

    fn request_target(&self) -> &'a str {
        self.part(1)
    }

    fn http_version(&self) -> &'a str {
        self.part(2)
    }
}

/// An incoming request as the router sees it. The body is kept as opaque
/// bytes and never interpreted.
#[derive(Debug)]
pub struct Request {
    request_line: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(
        request_line: impl Into<String>,
        headers: HashMap<String, String>,
        body: Option<Vec<u8>>,
    ) -> Self {
        Self {
            request_line: request_line.into(),
            headers,
            body,
        }
    }

    /// A request with no headers and no body, e.g. `GET /player/1 HTTP/1.1`.
    pub fn from_line(request_line: impl Into<String>) -> Self {
        Self::new(request_line, HashMap::new(), None)
    }

    pub fn get_http_method(&self) -> &str {
        RequestLine::new(&self.request_line).http_method()
    }

    pub fn get_request_target(&self) -> &str {
        RequestLine::new(&self.request_line).request_target()
    }

    pub fn get_http_version(&self) -> &str {
        RequestLine::new(&self.request_line).http_version()
    }

    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers.get(&key.to_lowercase()).map(|v| v.as_str())
    }

    pub fn get_body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// True if the client asked for the connection to be closed.
    pub fn wants_close(&self) -> bool {
        self.get_header("connection").is_some_and(|v| {
            v.split(',')
                .any(|token| token.trim().eq_ignore_ascii_case("close"))
        })
    }
}

#[derive(Error, Debug)]
#[error("end of file")]
pub struct EndOfFile;

#[derive(Error, Debug)]
#[error("invalid request")]
pub struct InvalidRequest;

#[derive(Error, Debug)]
#[error("request line exceeds {} bytes", REQUEST_LINE_LIMIT)]
pub struct UriTooLong;

#[derive(Error, Debug)]
#[error("body exceeds {} bytes", BODY_LIMIT)]
pub struct ContentTooLarge;

pub struct RequestReader<R> {
    buf_reader: Take<BufReader<R>>,
}

impl<R: Read> RequestReader<R> {
    pub fn new(r: R) -> Self {
        Self {
            buf_reader: BufReader::new(r).take(u64::MAX),
        }
    }

    pub fn read(&mut self) -> anyhow::Result<Request> {
        let mut request_line = String::new();
        self.buf_reader.set_limit(REQUEST_LINE_LIMIT);
        let n = self.buf_reader.read_line(&mut request_line)?;
        if n == 0 {
            Err(EndOfFile)?
        }
        if n as u64 == REQUEST_LINE_LIMIT && !request_line.ends_with("\r\n") {
            Err(UriTooLong)?
        }
        request_line = request_line
            .strip_suffix("\r\n")
            .ok_or(InvalidRequest)?
            .to_owned();

        if request_line.split(' ').count() != 3 {
            Err(InvalidRequest)?
        }

        debug!(?request_line);

        let mut headers = HashMap::new();
        self.buf_reader.set_limit(HEADERS_LIMIT);
        loop {
            let mut line = String::new();
            self.buf_reader.read_line(&mut line)?;
            line = line.strip_suffix("\r\n").ok_or(InvalidRequest)?.to_owned();

            if line.is_empty() {
                break;
            }
            let (k, v) = line.split_once(':').ok_or(InvalidRequest)?;
            headers.insert(k.to_lowercase(), v.trim().to_owned());
        }

        // The body is drained so the next request on the connection starts
        // at the right offset.
        let mut body = None;
        if let Some(content_length) = headers.get("content-length") {
            let content_length: usize = content_length.parse().map_err(|_| InvalidRequest)?;
            if content_length > BODY_LIMIT {
                Err(ContentTooLarge)?
            }
            let mut buf = vec![0; content_length];
            self.buf_reader.set_limit(content_length as u64);
            if let Err(err) = self.buf_reader.read_exact(&mut buf) {
                if err.kind() == ErrorKind::UnexpectedEof {
                    Err(InvalidRequest)?
                } else {
                    Err(err)?
                }
            }
            body = Some(buf);
        }

        Ok(Request::new(request_line, headers, body))
    }
}
