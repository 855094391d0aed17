use std::{
    io::Write,
    net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs},
    thread,
    time::Duration,
};

use strum_macros::{Display, EnumString};
use tracing::{error, info, span, warn, Level, Span};

use crate::{
    request::{ContentTooLarge, EndOfFile, Request, RequestReader, UriTooLong},
    response_writer::ResponseWriter,
    status_code_registry::Status,
};

/// Method tokens are case-sensitive: only the exact strings `GET` and
/// `POST` parse.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    read_timeout: Option<Duration>,
}

impl Server {
    pub fn new(addr: impl ToSocketAddrs) -> anyhow::Result<Self> {
        Ok(Self {
            listener: TcpListener::bind(addr)?,
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
        })
    }

    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn run(&self, handler: impl Handler + Sync) {
        let read_timeout = self.read_timeout;
        let handler = &handler;
        thread::scope(|s| {
            for stream in self.listener.incoming() {
                let stream = match stream {
                    Ok(stream) => stream,
                    Err(err) => {
                        error!(?err);
                        continue;
                    }
                };

                s.spawn(move || {
                    let span = create_conn_span(&stream);
                    let _guard = span.enter();
                    info!("new conn");

                    if let Err(err) = handle_connection(stream, read_timeout, handler) {
                        error!(?err);
                    }

                    info!("conn end");
                });
            }
        });
    }
}

#[derive(Debug)]
enum ConnCtrl {
    KeepAlive,
    Close,
}

fn handle_connection(
    stream: TcpStream,
    read_timeout: Option<Duration>,
    handler: &impl Handler,
) -> anyhow::Result<()> {
    let (reader, writer) = (&stream, &stream);
    reader.set_read_timeout(read_timeout)?;
    let mut request_reader = RequestReader::new(reader);

    loop {
        match handle_request(&mut request_reader, writer, handler)? {
            ConnCtrl::KeepAlive => continue,
            ConnCtrl::Close => return Ok(()),
        }
    }
}

fn handle_request(
    request_reader: &mut RequestReader<&TcpStream>,
    mut writer: &TcpStream,
    handler: &impl Handler,
) -> anyhow::Result<ConnCtrl> {
    let r = match request_reader.read() {
        Ok(r) => r,
        Err(err) => {
            if err.downcast_ref::<EndOfFile>().is_some() {
                return Ok(ConnCtrl::Close);
            }

            error!(?err);
            let status = if err.downcast_ref::<ContentTooLarge>().is_some() {
                Status::ContentTooLarge
            } else if err.downcast_ref::<UriTooLong>().is_some() {
                Status::URITooLong
            } else {
                Status::BadRequest
            };
            let mut w = ResponseWriter::new_empty();
            w.set_status(status);
            writer.write_all(&w.write())?;
            return Ok(ConnCtrl::Close);
        }
    };

    let span = create_req_span(&r);
    let _guard = span.enter();
    info!(?r);

    let conn_ctrl = if r.wants_close() {
        ConnCtrl::Close
    } else {
        ConnCtrl::KeepAlive
    };

    let mut w = ResponseWriter::new_empty();
    handler.handle(&mut w, &r);
    if w.get_status_code().is_none() {
        warn!("handler did not set a status");
        w.set_status(Status::NotFound);
    }
    writer.write_all(&w.write())?;
    Ok(conn_ctrl)
}

fn create_conn_span(stream: &TcpStream) -> Span {
    let peer_addr = match stream.peer_addr() {
        Ok(addr) => addr.to_string(),
        Err(err) => {
            error!(?err);
            "unknown".to_owned()
        }
    };

    span!(Level::INFO, "conn", peer_addr)
}

fn create_req_span(r: &Request) -> Span {
    span!(
        Level::INFO,
        "req",
        method = r.get_http_method(),
        target = r.get_request_target(),
        version = r.get_http_version()
    )
}

/// Anything that can answer a request: the router itself, and the POST,
/// invalid-method and no-route handlers it falls back to.
pub trait Handler {
    fn handle(&self, w: &mut ResponseWriter, r: &Request);
}

impl<T> Handler for T
where
    T: Fn(&mut ResponseWriter, &Request),
{
    fn handle(&self, w: &mut ResponseWriter, r: &Request) {
        self(w, r)
    }
}

#[cfg(test)]
pub fn noop_handler() -> impl Handler + Send + Sync {
    |_: &mut ResponseWriter, _: &Request| {}
}
