use crate::http::request::Request;
use std::collections::HashMap;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The header terminator has not arrived yet.
    Incomplete,
    /// The request line lacks a method or a path.
    MalformedRequestLine(String),
}

/// A header line without a colon. Never fatal: the line is skipped.
#[derive(Debug, PartialEq, Eq)]
pub struct MalformedHeaderLine(pub String);

/// Parses a request head out of `buf`.
///
/// Returns the request and the number of bytes up to and including the
/// blank line. Bytes past the terminator (a body, a pipelined request) are
/// left alone.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    // Look for header/end separator
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let head = String::from_utf8_lossy(&buf[..headers_end]);

    let mut lines = head.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

    // Request line
    let request_line = lines.next().unwrap_or("");
    let (method, path) = parse_request_line(request_line)?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        match parse_header_line(line) {
            Ok((name, value)) => {
                headers.insert(name.to_string(), value.to_string());
            }
            Err(e) => {
                tracing::warn!("Malformed header line: {:?}", e.0);
            }
        }
    }

    let request = Request {
        method: method.to_string(),
        path: path.to_string(),
        headers,
    };

    Ok((request, headers_end + 4))
}

/// Splits `METHOD SP PATH SP VERSION`. The version is optional and discarded.
fn parse_request_line(line: &str) -> Result<(&str, &str), ParseError> {
    let mut parts = line.split_whitespace();

    match (parts.next(), parts.next()) {
        (Some(method), Some(path)) => Ok((method, path)),
        _ => Err(ParseError::MalformedRequestLine(line.to_string())),
    }
}

/// Splits `Name: value` on the first colon. Leading spaces and tabs are
/// trimmed from the value; the name is kept verbatim.
fn parse_header_line(line: &str) -> Result<(&str, &str), MalformedHeaderLine> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| MalformedHeaderLine(line.to_string()))?;

    Ok((name, value.trim_start_matches([' ', '\t'])))
}

pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn header_value_keeps_inner_colons() {
        let (name, value) = parse_header_line("Referer: http://a/b").unwrap();
        assert_eq!(name, "Referer");
        assert_eq!(value, "http://a/b");
    }

    #[test]
    fn request_line_without_path_is_malformed() {
        assert!(matches!(
            parse_request_line("GET"),
            Err(ParseError::MalformedRequestLine(_))
        ));
    }
}
