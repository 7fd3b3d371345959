use std::any::Any;
use std::io;
use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::{Handler, Router};

const READ_CHUNK: usize = 8192;

/// One client connection, served exactly once.
///
/// Owns the stream, the read buffer, the request and the response. `run`
/// drives the state machine to completion and always ends by closing the
/// stream; keep-alive is never honored.
pub struct Connection<S> {
    stream: S,
    peer: Option<SocketAddr>,
    router: Arc<Router>,
    buffer: BytesMut,
    request: Request,
    response: Response,
    state: ConnectionState,
}

pub enum ConnectionState {
    /// Waiting for the `\r\n\r\n` header terminator.
    AwaitingHeaders,
    /// Request head parsed, not yet routed.
    Parsed,
    /// Handler chosen, about to run.
    Dispatching(Handler),
    WritingResponse(ResponseWriter),
    Closed,
}

impl ConnectionState {
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionState::AwaitingHeaders => "awaiting-headers",
            ConnectionState::Parsed => "parsed",
            ConnectionState::Dispatching(_) => "dispatching",
            ConnectionState::WritingResponse(_) => "writing-response",
            ConnectionState::Closed => "closed",
        }
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream,
            peer: None,
            router,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            request: Request::default(),
            response: Response::default(),
            state: ConnectionState::AwaitingHeaders,
        }
    }

    pub fn with_peer(mut self, peer: SocketAddr) -> Self {
        self.peer = Some(peer);
        self
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Drives the connection until it is closed.
    ///
    /// Returns `Err` only for socket faults; by then nothing more can be
    /// sent to the client.
    pub async fn run(&mut self) -> Result<(), Error> {
        loop {
            match &mut self.state {
                ConnectionState::AwaitingHeaders => {
                    self.state = match self.read_request().await? {
                        Some(Ok(request)) => {
                            self.request = request;
                            ConnectionState::Parsed
                        }
                        Some(Err(line)) => {
                            warn!("Malformed request line: {:?}", line);
                            self.response.status(400).text("Bad Request");
                            ConnectionState::WritingResponse(ResponseWriter::new(&self.response))
                        }
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Parsed => {
                    info!("Request: {} {}", self.request.method, self.request.path);
                    let handler = self.router.match_request(&self.request);
                    self.state = ConnectionState::Dispatching(handler);
                }

                ConnectionState::Dispatching(handler) => {
                    dispatch(handler, &self.request, &mut self.response);
                    self.state =
                        ConnectionState::WritingResponse(ResponseWriter::new(&self.response));
                }

                ConnectionState::WritingResponse(writer) => {
                    let sent = writer.len();
                    if let Err(e) = writer.write_to_stream(&mut self.stream).await {
                        self.state = ConnectionState::Closed;
                        return Err(e);
                    }

                    info!(
                        status = self.response.status_code,
                        "Sent response ({} bytes) for {} {}",
                        sent,
                        self.request.method,
                        self.request.path
                    );
                    self.close().await;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until a complete request head is buffered.
    ///
    /// `Ok(None)` means the client went away first. `Ok(Some(Err(line)))`
    /// carries a request line that lacks a method or path.
    async fn read_request(&mut self) -> Result<Option<Result<Request, String>>, Error> {
        loop {
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    // Anything past the head (a body) is dropped unread
                    let _ = self.buffer.split_to(consumed);
                    return Ok(Some(Ok(request)));
                }

                Err(ParseError::Incomplete) => {}

                Err(ParseError::MalformedRequestLine(line)) => {
                    return Ok(Some(Err(line)));
                }
            }

            self.buffer.reserve(READ_CHUNK);
            let n = match self.stream.read_buf(&mut self.buffer).await {
                Ok(n) => n,
                Err(e) if is_expected_disconnect(&e) => {
                    debug!(peer = ?self.peer, "Client went away: {}", e);
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            };

            if n == 0 {
                if !self.buffer.is_empty() {
                    debug!(
                        peer = ?self.peer,
                        "Client closed with {} bytes of incomplete headers",
                        self.buffer.len()
                    );
                }
                return Ok(None);
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.shutdown().await {
            if e.kind() != io::ErrorKind::NotConnected {
                warn!("Socket shutdown error: {}", e);
            }
        }
    }
}

/// Runs `handler`, folding an `Err` or a panic into a 500.
pub fn dispatch(handler: &Handler, request: &Request, response: &mut Response) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(request, response)));

    let fault = match outcome {
        Ok(Ok(())) => return,
        Ok(Err(e)) => Error::Handler(format!("{e:#}")),
        Err(payload) => Error::Handler(panic_message(payload.as_ref())),
    };

    error!(
        "Handler failed for {} {}: {}",
        request.method, request.path, fault
    );
    response.internal_error();
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic with unknown payload".to_string()
    }
}

fn is_expected_disconnect(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::UnexpectedEof | io::ErrorKind::ConnectionAborted
    )
}
