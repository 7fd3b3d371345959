use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::Error;
use crate::http::response::{Response, reason_phrase};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Renders `resp` into wire bytes.
///
/// Headers are emitted sorted by name. `Content-Length` is always computed
/// from the body; a handler-supplied value is dropped.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status_code,
        reason_phrase(resp.status_code)
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    let mut headers: Vec<_> = resp
        .headers
        .iter()
        .filter(|(k, _)| !k.eq_ignore_ascii_case("Content-Length"))
        .collect();
    headers.sort_by(|a, b| a.0.cmp(b.0));

    for (k, v) in headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(format!("Content-Length: {}\r\n", resp.body.len()).as_bytes());

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(&resp.body);

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    /// Total size of the rendered response.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> Result<(), Error>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(Error::Socket(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "connection closed while writing",
                )));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
