//! The server engine: routing table, live sessions, and the `think` tick.
//!
//! [`HttpServer`] is an explicitly owned value: construct one, hook
//! content, bind listeners, then drive it from your own run loop by
//! calling [`HttpServer::think`] repeatedly. One tick performs a bounded
//! amount of work: it walks every live session once (timeout eviction,
//! one non-blocking read, request processing) and then offers every
//! listener one non-blocking accept. Nothing in a tick ever blocks, and
//! nothing a peer sends can make a tick fail.
//!
//! Driving existing sessions before admitting new connections keeps a
//! burst of fresh connections from starving already-open keep-alive
//! sessions.

use std::io::{self, Read, Write};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use bytes::Buf;
use http::StatusCode;
use tracing::{debug, info, trace, warn};

use crate::codec::{contains_terminator, decode_head, encode_not_found, encode_response, encode_too_large};
use crate::connection::{Connection, Listener, Session, TcpAcceptor};
use crate::protocol::{BindError, Command};
use crate::routing::{Content, Router};

/// Engine tunables.
///
/// All fields are plain data; adjust them before serving starts, or
/// between ticks (the engine never runs concurrently with its embedder).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Idle limit for sessions that are not keep-alive.
    pub session_timeout: Duration,
    /// Idle limit for keep-alive sessions.
    pub keep_alive_timeout: Duration,
    /// Hard cap on the accumulated request buffer, in bytes.
    pub max_request_size: usize,
    /// Whether keep-alive sessions are retained at all.
    pub keep_alive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            session_timeout: Duration::from_secs(30),
            keep_alive_timeout: Duration::from_secs(30),
            max_request_size: 1024,
            keep_alive: true,
        }
    }
}

/// An embeddable HTTP/1.x request-serving engine.
///
/// The server owns everything transitively: the routing table with its
/// hosts, every listening socket, and every live session. Dropping the
/// server tears all of it down.
pub struct HttpServer {
    router: Router,
    listeners: Vec<Box<dyn Listener>>,
    sessions: Vec<Session>,
    config: ServerConfig,
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self { router: Router::new(), listeners: Vec::new(), sessions: Vec::new(), config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ServerConfig {
        &mut self.config
    }

    /// Registers a plain-TCP listening socket.
    ///
    /// Returns the bound local address (useful with port 0).
    pub fn bind(&mut self, addr: &str, port: u16) -> Result<SocketAddr, BindError> {
        let acceptor = TcpAcceptor::bind(addr, port).map_err(|e| BindError::bind(addr, port, e))?;
        let local = acceptor.local_addr().map_err(|e| BindError::bind(addr, port, e))?;
        info!(%local, "listening");
        self.listeners.push(Box::new(acceptor));
        Ok(local)
    }

    /// Registers an embedder-provided listener.
    ///
    /// This is how secure (or otherwise custom) transports attach: the
    /// engine only requires non-blocking accept/read/write semantics.
    pub fn bind_listener(&mut self, listener: Box<dyn Listener>) {
        self.listeners.push(listener);
    }

    /// Local addresses of all registered listeners that report one.
    pub fn local_addrs(&self) -> Vec<SocketAddr> {
        self.listeners.iter().filter_map(|listener| listener.local_addr().ok()).collect()
    }

    /// Registers `content` at `path` on the named virtual host (the empty
    /// name targets the global namespace).
    pub fn hook(&mut self, hostname: &str, path: &str, content: Content) {
        self.router.hook(hostname, path, content);
    }

    pub fn has_host(&self, hostname: &str) -> bool {
        self.router.has_host(hostname)
    }

    pub fn has(&self, hostname: &str, path: &str) -> bool {
        self.router.has(hostname, path)
    }

    /// Removes a virtual host and everything hooked on it. The global
    /// namespace host is permanent and cannot be removed.
    pub fn remove_host(&mut self, hostname: &str) -> bool {
        self.router.remove_host(hostname)
    }

    pub fn remove(&mut self, hostname: &str, path: &str) -> bool {
        self.router.remove(hostname, path)
    }

    pub fn find(&self, path: &str) -> Option<&Content> {
        self.router.find(path)
    }

    pub fn find_in(&self, hostname: &str, path: &str) -> Option<&Content> {
        self.router.find_in(hostname, path)
    }

    /// Invokes the handler at `path` in the global namespace, bypassing
    /// the socket layer entirely.
    pub fn execute(&self, path: &str, parameters: &str) -> Option<String> {
        self.router.execute(path, parameters)
    }

    pub fn execute_in(&self, hostname: &str, path: &str, parameters: &str) -> Option<String> {
        self.router.execute_in(hostname, path, parameters)
    }

    /// Number of currently retained sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Runs one cooperative tick: drive existing sessions, then admit new
    /// connections. Returns the number of requests served this tick, which
    /// an embedder's run loop can use to decide whether to idle.
    pub fn think(&mut self) -> usize {
        // One clock sample per tick keeps eviction decisions consistent
        // across all sessions in the tick.
        let now = Instant::now();
        let mut served = 0;
        let mut scratch = vec![0u8; self.config.max_request_size + 1];

        let Self { router, listeners, sessions, config } = self;

        sessions.retain_mut(|session| drive_session(router, config, now, session, &mut scratch, &mut served));

        for listener in listeners.iter_mut() {
            match listener.accept() {
                Ok(Some(stream)) => {
                    if let Some(session) = admit(router, config, now, stream, &mut scratch, &mut served) {
                        sessions.push(session);
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(cause = %e, "accept failed"),
            }
        }

        served
    }
}

impl std::fmt::Debug for HttpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpServer")
            .field("router", &self.router)
            .field("listeners", &self.listeners.len())
            .field("sessions", &self.sessions)
            .field("config", &self.config)
            .finish()
    }
}

/// Drives one live session for one tick. Returns false to evict.
fn drive_session(
    router: &Router,
    config: &ServerConfig,
    now: Instant,
    session: &mut Session,
    scratch: &mut [u8],
    served: &mut usize,
) -> bool {
    let timeout = if session.keep_alive { config.keep_alive_timeout } else { config.session_timeout };
    if now.duration_since(session.last_active) > timeout {
        debug!(session = ?session, "evicting idle session");
        return false;
    }

    match session.stream.read(scratch) {
        Ok(0) => {
            trace!("peer disconnected");
            false
        }
        Ok(n) => {
            if session.buffer.len() + n > config.max_request_size {
                reject_too_large(session);
                return false;
            }
            session.buffer.extend_from_slice(&scratch[..n]);

            if contains_terminator(&session.buffer) {
                session.last_active = now;
                process_requests(router, config, session, served);
                session.keep_alive
            } else if session.buffer.len() == config.max_request_size {
                // cap reached without a complete request
                reject_too_large(session);
                false
            } else {
                true
            }
        }
        Err(e) if e.kind() == io::ErrorKind::WouldBlock => true,
        Err(e) => {
            debug!(cause = %e, "read failed, dropping session");
            false
        }
    }
}

/// Admits a freshly accepted connection: one immediate read, and inline
/// processing when a complete request already arrived. Returns the
/// session to retain, if any.
fn admit(
    router: &Router,
    config: &ServerConfig,
    now: Instant,
    stream: Box<dyn Connection>,
    scratch: &mut [u8],
    served: &mut usize,
) -> Option<Session> {
    let mut session = Session::new(stream, now);

    match session.stream.read(scratch) {
        // peer went away before sending anything
        Ok(0) => None,
        Ok(n) if n <= config.max_request_size => {
            session.buffer.extend_from_slice(&scratch[..n]);
            let complete = contains_terminator(&session.buffer);

            if n == config.max_request_size && !complete {
                reject_too_large(&mut session);
                return None;
            }
            if !complete {
                return Some(session);
            }

            process_requests(router, config, &mut session, served);
            session.keep_alive.then_some(session)
        }
        Ok(_) => {
            reject_too_large(&mut session);
            None
        }
        Err(e) if e.kind() == io::ErrorKind::WouldBlock => Some(session),
        Err(e) => {
            debug!(cause = %e, "initial read failed, dropping connection");
            None
        }
    }
}

/// The request processor: decodes and answers every complete request in
/// the session buffer before yielding, so pipelined requests delivered in
/// one read are all answered in order.
fn process_requests(router: &Router, config: &ServerConfig, session: &mut Session, served: &mut usize) {
    loop {
        let Some(head) = decode_head(&session.buffer, session.version, session.keep_alive) else {
            break;
        };

        session.version = head.version;
        session.keep_alive = head.keep_alive && config.keep_alive;
        if head.host.is_some() {
            session.host.clone_from(&head.host);
        }

        match head.command {
            Some(command) if command.is_routed() => {
                let include_body = command == Command::Get;
                let response = match router.resolve(session.host.as_deref(), &head.target) {
                    Some(content) => {
                        let body = content.execute(&head.parameters);
                        encode_response(
                            StatusCode::OK,
                            session.version,
                            content.content_type(),
                            content.charset(),
                            content.language(),
                            &body,
                            include_body,
                        )
                    }
                    None => {
                        debug!(target = %head.target, "no content matched");
                        encode_not_found(session.version, include_body)
                    }
                };
                if let Err(e) = session.stream.write_all(&response) {
                    debug!(cause = %e, "response write failed, closing");
                    session.keep_alive = false;
                }
                *served += 1;
            }
            Some(_) => {
                debug!("unrecognized method, no response generated");
            }
            // headers without a request line; nothing to answer
            None => {}
        }

        if !session.keep_alive {
            break;
        }
        session.buffer.advance(head.consumed);
        if !contains_terminator(&session.buffer) {
            break;
        }
    }
}

fn reject_too_large(session: &mut Session) {
    debug!(buffered = session.buffer.len(), "request exceeds size cap, rejecting");
    let response = encode_too_large(session.version);
    if let Err(e) = session.stream.write_all(&response) {
        trace!(cause = %e, "peer gone before reject notice");
    }
}
