use std::io;
use thiserror::Error;

/// Error returned when a listening socket cannot be registered.
///
/// Everything past `bind` is deliberately infallible from the embedder's
/// point of view: per-connection protocol and socket failures degrade to
/// closing the affected connection and never surface out of the tick loop.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("failed to bind {addr}:{port}: {source}")]
    Bind {
        addr: String,
        port: u16,
        #[source]
        source: io::Error,
    },
}

impl BindError {
    pub fn bind(addr: impl Into<String>, port: u16, source: io::Error) -> Self {
        Self::Bind { addr: addr.into(), port, source }
    }
}
