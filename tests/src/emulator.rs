//! In-process stand-in for holder firmware.
//!
//! Binds an ephemeral loopback port and answers every connection with a
//! canned reply, the way the real device does: one response, then the
//! socket closes. Server tasks die with the test runtime.

use std::net::Ipv4Addr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use spoolwatch_common::network::endpoint::Endpoint;

/// Serves `reply` verbatim to every connection.
pub async fn serve(reply: String) -> Endpoint {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let endpoint = local_endpoint(&listener);
    let reply: Arc<str> = reply.into();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let reply = Arc::clone(&reply);
            tokio::spawn(async move {
                // One read is enough; the probe writes its request whole.
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(reply.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    endpoint
}

/// Accepts connections and never says a word, to exercise the probe
/// timeout.
pub async fn serve_silence() -> Endpoint {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let endpoint = local_endpoint(&listener);

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                loop {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(_) => {}
                    }
                }
            });
        }
    });

    endpoint
}

/// An endpoint nothing listens on: bind, note the port, close again.
pub async fn dead_endpoint() -> Endpoint {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    local_endpoint(&listener)
}

pub fn http_ok(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

fn local_endpoint(listener: &TcpListener) -> Endpoint {
    let addr = listener.local_addr().unwrap();
    Endpoint::new(Ipv4Addr::LOCALHOST, addr.port())
}
