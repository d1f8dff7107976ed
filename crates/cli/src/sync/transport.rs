// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for HTTP communication.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests for production
//! - Mock transports for unit testing

use std::future::Future;
use std::pin::Pin;

use reqwest::header::ACCEPT;
use serde_json::Value;

/// Accept header sent with every request.
pub const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

/// Error type for transport operations.
///
/// Every variant means the request never produced a server answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The server could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request failed after the connection was made.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Serialization of the request body failed.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// A server answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body, `None` when the body was empty or not JSON.
    pub body: Option<Value>,
}

impl Response {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Response { status, body }
    }

    /// Shorthand for a 200 response with a JSON body.
    pub fn ok(body: Value) -> Self {
        Response::new(200, Some(body))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport trait for JSON-over-HTTP communication.
///
/// This trait abstracts over the actual transport mechanism, allowing
/// for easy testing with mock implementations. Methods take `&self` so a
/// single transport can serve overlapping requests.
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `url`.
    fn post_json(
        &self,
        url: &str,
        body: Value,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Response>> + Send + '_>>;
}

/// HTTP transport implementation using reqwest.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// No request timeout is set: a slow server delays a flush, it never
    /// drops queued data.
    pub fn new() -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
        }
    }
}

impl Transport for HttpTransport {
    fn post_json(
        &self,
        url: &str,
        body: Value,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Response>> + Send + '_>> {
        let url = url.to_string();
        Box::pin(async move {
            let response = self
                .client
                .post(&url)
                .header(ACCEPT, ACCEPT_VALUE)
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_connect() || e.is_timeout() {
                        TransportError::ConnectionFailed(e.to_string())
                    } else if e.is_builder() {
                        TransportError::SerializationError(e.to_string())
                    } else {
                        TransportError::RequestFailed(e.to_string())
                    }
                })?;

            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

            // A non-JSON body is still an answer; the caller decides what it means.
            let body = serde_json::from_str(&text).ok();
            Ok(Response { status, body })
        })
    }
}
