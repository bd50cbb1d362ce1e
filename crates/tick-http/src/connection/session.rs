use std::fmt;
use std::time::Instant;

use bytes::BytesMut;
use http::Version;

use crate::connection::Connection;

/// Per-connection mutable state.
///
/// A session owns its stream and request buffer. The protocol version and
/// keep-alive flag are sticky across pipelined requests; `host` remembers
/// the most recent `Host:` header value. `last_active` drives timeout
/// eviction and is stamped at creation and whenever a complete request is
/// processed.
pub(crate) struct Session {
    pub(crate) stream: Box<dyn Connection>,
    pub(crate) buffer: BytesMut,
    pub(crate) keep_alive: bool,
    pub(crate) host: Option<String>,
    pub(crate) version: Version,
    pub(crate) last_active: Instant,
}

impl Session {
    pub(crate) fn new(stream: Box<dyn Connection>, now: Instant) -> Self {
        Self {
            stream,
            buffer: BytesMut::new(),
            keep_alive: false,
            host: None,
            version: Version::HTTP_10,
            last_active: now,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("buffered", &self.buffer.len())
            .field("keep_alive", &self.keep_alive)
            .field("host", &self.host)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
