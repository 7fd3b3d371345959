use serde::ser::{Error as _, Serialize, Serializer};
use warden::http::response::{Response, reason_phrase};

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("refusing to serialize"))
    }
}

#[derive(serde::Serialize)]
struct Status {
    title: &'static str,
    ok: bool,
}

fn rendered(res: &Response) -> String {
    String::from_utf8(res.to_bytes()).unwrap()
}

#[test]
fn test_reason_phrase_table() {
    assert_eq!(reason_phrase(100), "Continue");
    assert_eq!(reason_phrase(200), "OK");
    assert_eq!(reason_phrase(201), "Created");
    assert_eq!(reason_phrase(204), "No Content");
    assert_eq!(reason_phrase(302), "Found");
    assert_eq!(reason_phrase(400), "Bad Request");
    assert_eq!(reason_phrase(404), "Not Found");
    assert_eq!(reason_phrase(405), "Method Not Allowed");
    assert_eq!(reason_phrase(500), "Internal Server Error");
    assert_eq!(reason_phrase(503), "Service Unavailable");
}

#[test]
fn test_reason_phrase_unknown() {
    assert_eq!(reason_phrase(418), "Unknown Status");
    assert_eq!(reason_phrase(999), "Unknown Status");
}

#[test]
fn test_response_defaults() {
    let res = Response::new();

    assert_eq!(res.status_code, 200);
    assert_eq!(res.content_type(), Some("text/plain"));
    assert_eq!(res.headers.len(), 1);
    assert!(res.body.is_empty());
}

#[test]
fn test_response_text_and_html() {
    let mut res = Response::new();
    res.html("<h1>hi</h1>");
    assert_eq!(res.content_type(), Some("text/html"));
    assert_eq!(res.body, b"<h1>hi</h1>".to_vec());

    res.text("plain");
    assert_eq!(res.content_type(), Some("text/plain"));
    assert_eq!(res.body, b"plain".to_vec());
}

#[test]
fn test_response_json() {
    let mut res = Response::new();
    res.json(&Status {
        title: "up",
        ok: true,
    });

    assert_eq!(res.status_code, 200);
    assert_eq!(res.content_type(), Some("application/json"));
    assert_eq!(res.body, br#"{"title":"up","ok":true}"#.to_vec());
}

#[test]
fn test_response_json_failure_degrades_to_500() {
    let mut res = Response::new();
    res.status(201).json(&Unserializable);

    assert_eq!(res.status_code, 500);
    assert_eq!(res.content_type(), Some("text/plain"));
    assert_eq!(res.body, b"Internal Server Error".to_vec());
}

#[test]
fn test_serialize_status_line_and_content_length() {
    let mut res = Response::new();
    res.text("Hello, World!");
    let wire = rendered(&res);

    assert!(wire.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(wire.contains("Content-Type: text/plain\r\n"));
    assert!(wire.contains("Content-Length: 13\r\n"));
    assert!(wire.ends_with("\r\n\r\nHello, World!"));
}

#[test]
fn test_serialize_unknown_status() {
    let mut res = Response::new();
    res.status(299);

    assert!(rendered(&res).starts_with("HTTP/1.1 299 Unknown Status\r\n"));
}

#[test]
fn test_serialize_replaces_handler_content_length() {
    let mut res = Response::new();
    res.header("Content-Length", "999").text("test");
    let wire = rendered(&res);

    assert!(wire.contains("Content-Length: 4\r\n"));
    assert!(!wire.contains("999"));
}

#[test]
fn test_serialize_empty_body() {
    let mut res = Response::new();
    res.status(204);
    let wire = rendered(&res);

    assert!(wire.starts_with("HTTP/1.1 204 No Content\r\n"));
    assert!(wire.ends_with("Content-Length: 0\r\n\r\n"));
}

#[test]
fn test_serialize_headers_sorted() {
    let mut res = Response::new();
    res.header("X-B", "2").header("X-A", "1");
    let wire = rendered(&res);

    let a = wire.find("X-A: 1").unwrap();
    let b = wire.find("X-B: 2").unwrap();
    let ct = wire.find("Content-Type").unwrap();
    assert!(ct < a && a < b);
}

#[test]
fn test_serialize_binary_body_verbatim() {
    let mut res = Response::new();
    res.body = vec![0, 159, 146, 150, 255];
    let wire = res.to_bytes();

    assert!(wire.ends_with(&[0, 159, 146, 150, 255]));
    let head = String::from_utf8_lossy(&wire);
    assert!(head.contains("Content-Length: 5\r\n"));
}

#[test]
fn test_send_file_sets_mime_and_body() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("style.css");
    std::fs::write(&file, "body { color: red; }").unwrap();

    let mut res = Response::new();
    res.status(404);
    assert!(res.send_file(&file).is_ok());

    assert_eq!(res.status_code, 200);
    assert_eq!(res.content_type(), Some("text/css"));
    assert_eq!(res.body, b"body { color: red; }".to_vec());
}

#[test]
fn test_send_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("nope.txt");

    let mut res = Response::new();
    let err = res.send_file(&file).unwrap_err();

    assert!(matches!(err, warden::Error::FileNotFound(_)));
    assert_eq!(res.status_code, 404);
    assert_eq!(res.content_type(), Some("text/plain"));
    assert!(String::from_utf8_lossy(&res.body).starts_with("File not found: "));
}

#[test]
fn test_send_file_on_directory_is_500() {
    let dir = tempfile::tempdir().unwrap();

    let mut res = Response::new();
    let err = res.send_file(dir.path()).unwrap_err();

    assert!(matches!(err, warden::Error::FileRead { .. }));
    assert_eq!(res.status_code, 500);
    assert_eq!(res.body, b"Internal Server Error".to_vec());
}
