//! An embeddable, single-threaded HTTP/1.x request-serving engine.
//!
//! `tick-http` is not a framework that takes over your process. The
//! [`HttpServer`] is a plain value your application owns and drives:
//! every call to [`HttpServer::think`] performs one bounded,
//! non-blocking slice of work (timeouts, reads, request processing,
//! accepts) and returns. Your run loop decides when to tick and what to
//! do between ticks, which makes the engine trivial to embed in game
//! loops, simulation steps, or any other cooperative scheduler.
//!
//! Content is registered as closures on a tree of virtual hosts and
//! directories, and requests are routed to them with checksum-gated
//! name lookups:
//!
//! ```no_run
//! use std::time::Duration;
//! use tick_http::{Content, HttpServer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut server = HttpServer::new();
//!     server.hook("", "greet", Content::new("greet", |params| {
//!         format!("hello, {params}")
//!     }));
//!     server.bind("0.0.0.0", 8080)?;
//!
//!     loop {
//!         if server.think() == 0 {
//!             std::thread::sleep(Duration::from_millis(1));
//!         }
//!     }
//! }
//! ```
//!
//! The engine speaks enough HTTP/1.0 and HTTP/1.1 to serve `GET` and
//! `HEAD` with keep-alive and pipelining; it is deliberately not a
//! general-purpose web server.

pub mod checksum;
pub mod codec;
pub mod connection;
pub mod protocol;
pub mod routing;

mod server;

pub use crate::routing::Content;
pub use crate::server::{HttpServer, ServerConfig};
