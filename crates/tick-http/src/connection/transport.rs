use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener};

use tracing::trace;

/// A non-blocking byte stream carrying one client connection.
///
/// Reads and writes must never block: "nothing to do right now" is
/// reported as `io::ErrorKind::WouldBlock`, which the scheduler treats as
/// a normal outcome. Any other error counts as connection failure.
pub trait Connection: Read + Write + Send {}

impl<T: Read + Write + Send> Connection for T {}

/// A non-blocking listening socket producing [`Connection`]s.
///
/// This is the seam where alternative transports plug in: a TLS listener
/// is simply a `Listener` whose accepted connections handshake and
/// encrypt internally.
pub trait Listener: Send {
    /// Accepts one pending connection, or `None` when nothing is queued.
    fn accept(&mut self) -> io::Result<Option<Box<dyn Connection>>>;

    /// The local address the listener is bound to.
    fn local_addr(&self) -> io::Result<SocketAddr>;
}

/// The built-in plain-TCP listener.
pub(crate) struct TcpAcceptor {
    inner: TcpListener,
}

impl TcpAcceptor {
    pub(crate) fn bind(addr: &str, port: u16) -> io::Result<Self> {
        let inner = TcpListener::bind((addr, port))?;
        inner.set_nonblocking(true)?;
        Ok(Self { inner })
    }
}

impl Listener for TcpAcceptor {
    fn accept(&mut self) -> io::Result<Option<Box<dyn Connection>>> {
        match self.inner.accept() {
            Ok((stream, peer)) => {
                trace!(%peer, "accepted connection");
                stream.set_nonblocking(true)?;
                Ok(Some(Box::new(stream)))
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_reports_none_when_nothing_is_queued() {
        let mut acceptor = TcpAcceptor::bind("127.0.0.1", 0).unwrap();
        assert!(acceptor.accept().unwrap().is_none());
    }

    #[test]
    fn bound_port_is_observable() {
        let acceptor = TcpAcceptor::bind("127.0.0.1", 0).unwrap();
        assert_ne!(acceptor.local_addr().unwrap().port(), 0);
    }
}
