//! HTTP request head decoder.
//!
//! The decoder works on whatever bytes a session has accumulated so far:
//! a partial request, exactly one full request, or several pipelined full
//! requests back to back. It walks the buffer line by line (CRLF
//! separated) and classifies each line:
//!
//! - an empty line ends the request head and yields a [`RequestHead`]
//! - a line whose first whitespace token ends with `:` is a header field;
//!   only `Host` and `Connection: keep-alive` are significant
//! - anything else is the request line: method, target and version
//!
//! The decoder never fails: malformed lines degrade to an unrecognized
//! command that the processor answers with silence, exactly like an
//! unsupported method. `None` means the buffer does not yet hold a
//! complete head.
//!
//! # Pipelining
//!
//! [`RequestHead::consumed`] is the byte count of the decoded request
//! (all its lines plus their CRLF delimiters, including the terminating
//! blank line). Callers discard that prefix and probe the remainder with
//! [`contains_terminator`] to decide whether another complete request is
//! already buffered.

use http::Version;

use crate::protocol::Command;

/// The CRLF CRLF sequence ending a request head.
const REQUEST_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Returns true when `buf` contains a complete request terminator.
pub fn contains_terminator(buf: &[u8]) -> bool {
    buf.windows(REQUEST_TERMINATOR.len()).any(|window| window == REQUEST_TERMINATOR)
}

/// A decoded request head.
///
/// `version` and `keep_alive` start from the values carried over from the
/// session (both are sticky across pipelined requests on one connection)
/// and reflect anything this request changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    /// The recognized command, if the head contained a request line.
    pub command: Option<Command>,
    /// Resource path portion of the target (before any `?`).
    pub target: String,
    /// Verbatim, undecoded parameter string (after the first `?`).
    pub parameters: String,
    /// Negotiated protocol version.
    pub version: Version,
    /// Whether the connection should be kept open after responding.
    pub keep_alive: bool,
    /// Value of the `Host` header, verbatim, if one was present.
    pub host: Option<String>,
    /// Bytes this request occupied in the buffer, delimiters included.
    pub consumed: usize,
}

/// Decodes one request head from `src`, or `None` if the buffered bytes do
/// not yet contain a complete head.
///
/// `version` and `keep_alive` seed the sticky per-connection state.
pub fn decode_head(src: &[u8], version: Version, keep_alive: bool) -> Option<RequestHead> {
    let mut head = RequestHead {
        command: None,
        target: String::new(),
        parameters: String::new(),
        version,
        keep_alive,
        host: None,
        consumed: 0,
    };

    let mut offset = 0;
    while let Some(line_len) = find_crlf(&src[offset..]) {
        let mut line = &src[offset..offset + line_len];
        offset += line_len + 2;

        while let [b' ', rest @ ..] = line {
            line = rest;
        }

        if line.is_empty() {
            head.consumed = offset;
            return Some(head);
        }

        let first = word(line, 0);
        if let [name @ .., b':'] = first {
            decode_header_field(&mut head, name, line);
        } else {
            decode_request_line(&mut head, first, line);
        }
    }

    None
}

fn decode_header_field(head: &mut RequestHead, name: &[u8], line: &[u8]) {
    if name.eq_ignore_ascii_case(b"host") {
        head.host = Some(String::from_utf8_lossy(word(line, 1)).into_owned());
    } else if name.eq_ignore_ascii_case(b"connection") && word(line, 1).eq_ignore_ascii_case(b"keep-alive") {
        head.keep_alive = true;
    }
}

fn decode_request_line(head: &mut RequestHead, method: &[u8], line: &[u8]) {
    head.command = Some(match method {
        b"GET" => Command::Get,
        b"HEAD" => Command::Head,
        _ => Command::Unknown,
    });

    // Version negotiation applies even to unrecognized methods; only the
    // target matters exclusively to routed commands.
    if head.command.is_some_and(Command::is_routed) {
        let target = word(line, 1);
        match target.iter().position(|byte| *byte == b'?') {
            Some(split) => {
                head.target = String::from_utf8_lossy(&target[..split]).into_owned();
                head.parameters = String::from_utf8_lossy(&target[split + 1..]).into_owned();
            }
            None => {
                head.target = String::from_utf8_lossy(target).into_owned();
                head.parameters = String::new();
            }
        }
    }

    let protocol = word(line, 2);
    if protocol.eq_ignore_ascii_case(b"http/1.0") {
        head.version = Version::HTTP_10;
    } else if protocol.eq_ignore_ascii_case(b"http/1.1") {
        head.version = Version::HTTP_11;
        head.keep_alive = true;
    }
}

/// Finds the length of the first CRLF-terminated line in `src`.
fn find_crlf(src: &[u8]) -> Option<usize> {
    src.windows(2).position(|window| window == b"\r\n")
}

/// Returns the `index`-th space-delimited word of `line`, skipping runs of
/// spaces, or an empty slice when the line has fewer words.
fn word(line: &[u8], index: usize) -> &[u8] {
    line.split(|byte| *byte == b' ').filter(|w| !w.is_empty()).nth(index).unwrap_or(b"")
}
