//! Common test utilities
//!
//! Shared functionality used across the integration test modules: a minimal
//! canned-response HTTP listener that provider tests point the adapter at,
//! plus a request log for asserting which targets were hit.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A local HTTP/1.1 listener serving canned responses.
///
/// The handler receives the request target (path + query) and returns a
/// status code and a JSON body. Every request target is recorded so tests
/// can assert on request counts and pagination offsets. Responses for
/// status 429 carry a `Retry-After: 2` header.
pub struct TestServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    #[allow(dead_code)]
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        let handler = Arc::new(handler);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let handler = Arc::clone(&handler);
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    serve_connection(stream, handler, log).await;
                });
            }
        });

        Self {
            url: format!("http://{addr}"),
            requests,
        }
    }

    /// Snapshot of every request target received so far.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve_connection(
    mut stream: tokio::net::TcpStream,
    handler: Arc<dyn Fn(&str) -> (u16, String) + Send + Sync>,
    log: Arc<Mutex<Vec<String>>>,
) {
    let mut buf = vec![0u8; 16 * 1024];
    let mut read = 0;

    // GET requests only: read until the end of the header block.
    loop {
        match stream.read(&mut buf[read..]).await {
            Ok(0) => return,
            Ok(n) => {
                read += n;
                if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
                if read == buf.len() {
                    return;
                }
            }
            Err(_) => return,
        }
    }

    let head = String::from_utf8_lossy(&buf[..read]);
    let target = head
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(target.clone());

    let (status, body) = handler(&target);
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Error",
    };
    let extra = if status == 429 { "Retry-After: 2\r\n" } else { "" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n{extra}Connection: close\r\n\r\n{body}",
        body.len(),
    );

    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
