// src/fetch/testing.rs
// =============================================================================
// Test-only HTTP servers for failures wiremock can't produce.
//
// wiremock always sends a complete response, so a body that is cut off
// mid-transfer needs a hand-written server on a raw TCP socket.
// =============================================================================

use tokio::io::{AsyncReadExt, AsyncWriteExt}; // read()/write_all()/shutdown() on TcpStream
use tokio::net::TcpListener;

// Starts a server that promises a 100 byte body, sends 6 bytes of it and hangs
// up. Returns the address to fetch.
pub(crate) async fn truncated_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        // Drain the request headers first; closing with unread input would
        // reset the connection before the client sees the status line
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&chunk[..n]),
            }
        }

        let response = "HTTP/1.1 200 OK\r\n\
                        Content-Type: text/html\r\n\
                        Content-Length: 100\r\n\
                        \r\n\
                        <html>";
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}/", addr)
}
