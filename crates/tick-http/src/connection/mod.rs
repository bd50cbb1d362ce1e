//! Connection handling: the transport seam and per-connection state.
//!
//! The engine never talks to sockets directly; it drives [`Listener`] and
//! [`Connection`] trait objects. The built-in implementation wraps
//! non-blocking `std::net` TCP sockets. Embedders that need TLS (or any
//! other transport) register their own [`Listener`]; the engine only
//! requires non-blocking semantics, with `io::ErrorKind::WouldBlock` as
//! the single "not ready" signal.

mod transport;
pub use transport::Connection;
pub use transport::Listener;
pub(crate) use transport::TcpAcceptor;

mod session;
pub(crate) use session::Session;
