// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn pizza() -> Command {
    cargo_bin_cmd!("pizza")
}

/// `pizza` with its state in `state_dir` and the remote pointing at `remote`.
pub fn pizza_at(state_dir: &Path, remote: &str) -> Command {
    let mut cmd = pizza();
    cmd.env("PIZZA_HUNT_DIR", state_dir)
        .env("PIZZA_HUNT_REMOTE", remote)
        .env_remove("RUST_LOG");
    cmd
}

/// `pizza` with its state in `state_dir` and no reachable server.
pub fn pizza_offline(state_dir: &Path) -> Command {
    pizza_at(state_dir, &closed_port_url())
}

/// URL of a local port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Save a pizza while the server is unreachable.
pub fn save_offline(state_dir: &Path, name: &str) {
    pizza_offline(state_dir)
        .args(["new", "--name", name, "--by", "Sam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved offline"));
}

/// Serve one HTTP request with `status` and a JSON `body`.
///
/// Returns the base URL and a receiver yielding the raw request.
pub fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<String>) {
    serve(vec![(status, body)])
}

/// Answer one request per entry of `replies`, in order.
///
/// Returns the base URL and a receiver yielding each raw request.
pub fn serve(replies: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in replies {
            let (mut socket, _) = listener.accept().unwrap();
            let request = read_request(&mut socket);
            let reply = format!(
                "HTTP/1.1 {} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).unwrap();
            let _ = tx.send(request);
        }
    });

    (url, rx)
}

fn read_request(socket: &mut std::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).unwrap();
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
