//! Minimal embedder run loop.
//!
//! ```bash
//! cargo run --example hello
//! curl http://127.0.0.1:8080/greet?world
//! ```

use std::time::Duration;

use tick_http::{Content, HttpServer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let mut server = HttpServer::new();
    server.hook("", "greet", Content::new("greet", |params: &str| {
        if params.is_empty() { "hello\n".to_owned() } else { format!("hello, {params}\n") }
    }));
    server.hook(
        "",
        "",
        Content::new("", |_| "<h1>tick-http</h1>\n".to_owned()).with_content_type("text/html"),
    );

    let local = server.bind("127.0.0.1", 8080)?;
    println!("serving on http://{local}/");

    loop {
        // idle politely between ticks when nothing was served
        if server.think() == 0 {
            std::thread::sleep(Duration::from_millis(1));
        }
    }
}
