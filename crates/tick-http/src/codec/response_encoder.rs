//! HTTP response encoder.
//!
//! Responses are rendered into one contiguous byte run so the caller can
//! hand them to a non-blocking socket in a single write. The header set is
//! fixed: status line, `Date`, `Server`, `Content-Length`, `Connection`,
//! `Content-Type` (with optional charset), optional `Content-Language`.
//!
//! For `HEAD` requests the body is suppressed while `Content-Length` still
//! reports the real body length, as the protocol requires.

use std::fmt::Write;
use std::time::SystemTime;

use bytes::Bytes;
use http::{StatusCode, Version};

/// Value of the `Server` response header.
pub const SERVER_STRING: &str = concat!("tick-http/", env!("CARGO_PKG_VERSION"));

/// Body sent on a routing miss.
const NOT_FOUND_BODY: &str = "404 Not Found\n";

/// Body sent when a request exceeds the size cap.
const TOO_LARGE_BODY: &str = "413 Payload Too Large\n";

/// Encodes a complete response.
///
/// `content_type` defaults to `text/plain` when absent. `include_body`
/// is false for `HEAD` responses; the `Content-Length` header always
/// reflects the real body length either way.
pub fn encode_response(
    status: StatusCode,
    version: Version,
    content_type: Option<&str>,
    charset: Option<&str>,
    language: Option<&str>,
    body: &str,
    include_body: bool,
) -> Bytes {
    let connection = if version == Version::HTTP_11 { "keep-alive" } else { "close" };
    encode(status, version, connection, content_type, charset, language, body, include_body)
}

/// Encodes the response for a routing miss.
pub fn encode_not_found(version: Version, include_body: bool) -> Bytes {
    encode_response(StatusCode::NOT_FOUND, version, None, None, None, NOT_FOUND_BODY, include_body)
}

/// Encodes the response for an oversized request.
///
/// The connection is closed right after this is sent, so the header says
/// so regardless of version.
pub fn encode_too_large(version: Version) -> Bytes {
    encode(StatusCode::PAYLOAD_TOO_LARGE, version, "close", None, None, None, TOO_LARGE_BODY, true)
}

#[allow(clippy::too_many_arguments, reason = "internal assembly point for the fixed header set")]
fn encode(
    status: StatusCode,
    version: Version,
    connection: &str,
    content_type: Option<&str>,
    charset: Option<&str>,
    language: Option<&str>,
    body: &str,
    include_body: bool,
) -> Bytes {
    let mut out = String::with_capacity(256 + if include_body { body.len() } else { 0 });

    let reason = status.canonical_reason().unwrap_or("");
    let _ = write!(out, "{} {} {}\r\n", version_token(version), status.as_u16(), reason);
    let _ = write!(out, "Date: {}\r\n", httpdate::fmt_http_date(SystemTime::now()));
    let _ = write!(out, "Server: {SERVER_STRING}\r\n");
    let _ = write!(out, "Content-Length: {}\r\n", body.len());
    let _ = write!(out, "Connection: {connection}\r\n");

    let _ = write!(out, "Content-Type: {}", content_type.unwrap_or(mime::TEXT_PLAIN.as_ref()));
    if let Some(charset) = charset {
        let _ = write!(out, "; charset={charset}");
    }
    out.push_str("\r\n");

    if let Some(language) = language {
        let _ = write!(out, "Content-Language: {language}\r\n");
    }

    out.push_str("\r\n");
    if include_body {
        out.push_str(body);
    }

    Bytes::from(out.into_bytes())
}

fn version_token(version: Version) -> &'static str {
    if version == Version::HTTP_11 { "HTTP/1.1" } else { "HTTP/1.0" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(response: &Bytes) -> Vec<String> {
        let text = std::str::from_utf8(response).unwrap();
        text.split("\r\n").map(str::to_owned).collect()
    }

    fn header<'a>(lines: &'a [String], name: &str) -> Option<&'a str> {
        let prefix = format!("{name}: ");
        lines.iter().find_map(|line| line.strip_prefix(&prefix))
    }

    #[test]
    fn status_line_carries_negotiated_version() {
        let response = encode_response(StatusCode::OK, Version::HTTP_11, None, None, None, "hi", true);
        assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"));

        let response = encode_response(StatusCode::OK, Version::HTTP_10, None, None, None, "hi", true);
        assert!(response.starts_with(b"HTTP/1.0 200 OK\r\n"));
    }

    #[test]
    fn fixed_header_set() {
        let response = encode_response(StatusCode::OK, Version::HTTP_11, None, None, None, "hello", true);
        let lines = lines(&response);

        assert!(header(&lines, "Date").unwrap().ends_with("GMT"));
        assert_eq!(header(&lines, "Server"), Some(SERVER_STRING));
        assert_eq!(header(&lines, "Content-Length"), Some("5"));
        assert_eq!(header(&lines, "Connection"), Some("keep-alive"));
        assert_eq!(header(&lines, "Content-Type"), Some("text/plain"));
        assert_eq!(header(&lines, "Content-Language"), None);
        assert!(response.ends_with(b"\r\n\r\nhello"));
    }

    #[test]
    fn connection_close_for_http_1_0() {
        let response = encode_response(StatusCode::OK, Version::HTTP_10, None, None, None, "x", true);
        assert_eq!(header(&lines(&response), "Connection"), Some("close"));
    }

    #[test]
    fn content_metadata() {
        let response = encode_response(
            StatusCode::OK,
            Version::HTTP_11,
            Some("text/html"),
            Some("utf-8"),
            Some("en"),
            "<p>hi</p>",
            true,
        );
        let lines = lines(&response);
        assert_eq!(header(&lines, "Content-Type"), Some("text/html; charset=utf-8"));
        assert_eq!(header(&lines, "Content-Language"), Some("en"));
    }

    #[test]
    fn head_suppresses_body_but_keeps_real_length() {
        let response = encode_response(StatusCode::OK, Version::HTTP_11, None, None, None, "hello", false);
        assert_eq!(header(&lines(&response), "Content-Length"), Some("5"));
        assert!(response.ends_with(b"\r\n\r\n"));
    }

    #[test]
    fn not_found_is_a_real_response() {
        let response = encode_not_found(Version::HTTP_11, true);
        assert!(response.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
        assert!(response.ends_with(NOT_FOUND_BODY.as_bytes()));

        let head_variant = encode_not_found(Version::HTTP_11, false);
        assert!(head_variant.ends_with(b"\r\n\r\n"));
        assert_eq!(header(&lines(&head_variant), "Content-Length"), Some(&*NOT_FOUND_BODY.len().to_string()));
    }

    #[test]
    fn too_large_always_closes() {
        let response = encode_too_large(Version::HTTP_11);
        assert!(response.starts_with(b"HTTP/1.1 413 "));
        assert_eq!(header(&lines(&response), "Connection"), Some("close"));
    }
}
