//! Protocol vocabulary shared across the engine.
//!
//! This module collects the small protocol-level types: the recognized
//! request commands and the engine's error types. HTTP versions reuse
//! [`http::Version`]; only `HTTP/1.0` and `HTTP/1.1` are ever produced by
//! the decoder.

mod error;
pub use error::BindError;

/// A request command recognized by the engine.
///
/// Only `GET` and `HEAD` are routed. Any other method token is still
/// consumed from the wire (so the connection stays in sync) but produces
/// no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Get,
    Head,
    /// A syntactically present but unrecognized method token.
    Unknown,
}

impl Command {
    /// Returns true for commands that are answered with a routed response.
    pub fn is_routed(self) -> bool {
        matches!(self, Command::Get | Command::Head)
    }
}
