// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use ph_core::{LocalStore, Pizza};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::client::SyncClient;
use super::notify::Notifier;
use super::queue::SubmissionQueue;
use super::transport_tests::MockTransport;

/// Create a pizza payload with the given name.
pub fn make_payload(name: &str) -> Value {
    Pizza::new(name, "Sam").to_payload().unwrap()
}

/// Notifier that remembers every confirmation.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn confirm(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// A queue over an in-memory store and a mock transport.
///
/// Returns handles to the transport, the store and the notifier so tests can
/// inspect them.
pub fn make_queue(
    transport: MockTransport,
) -> (
    Arc<SubmissionQueue<MockTransport>>,
    LocalStore,
    RecordingNotifier,
) {
    let store = LocalStore::open_in_memory("pizza_hunt", 1).unwrap();
    let notifier = RecordingNotifier::default();
    let client = SyncClient::with_transport("http://test.invalid/api/pizzas", transport);
    let queue = SubmissionQueue::new(
        Some(store.clone()),
        client,
        Arc::new(notifier.clone()),
    );
    (Arc::new(queue), store, notifier)
}

/// URL of a local port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Serve exactly one HTTP request with `status` and `body`.
///
/// Returns the base URL and a receiver yielding the raw request text.
pub async fn serve_once(status: u16, body: &str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let body = body.to_string();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let reply = format!(
            "HTTP/1.1 {} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        let _ = tx.send(request);
    });

    (url, rx)
}

/// Read headers and a Content-Length body.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
