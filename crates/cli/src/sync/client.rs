// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync client for the pizza API's create-resource endpoint.
//!
//! Sends one payload or a whole batch in a single POST and classifies the
//! answer. A 2xx answer whose body is error-shaped is still a failure. No
//! error escapes: callers always get a [`SubmitResult`].

use std::fmt;

use ph_core::protocol::{self, ResponseKind};
use ph_core::QueuedRecord;
use serde_json::Value;

use super::transport::{HttpTransport, Response, Transport, TransportError, TransportResult};

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitFailure {
    /// No answer from the server (connection refused, reset, DNS, ...).
    Unreachable(String),
    /// The server answered with a non-2xx status.
    Status { status: u16, body: Option<Value> },
    /// The server answered 2xx but the body carries an error.
    Rejected(Value),
    /// The server answered 2xx without a JSON body.
    InvalidBody { status: u16 },
    /// The request could not be built.
    InvalidRequest(String),
}

impl SubmitFailure {
    /// True when the failure happened below the application layer.
    ///
    /// Only these failures should send a submission to the offline queue.
    pub fn is_network(&self) -> bool {
        matches!(self, SubmitFailure::Unreachable(_))
    }

    /// Server-provided diagnostic payload, if any.
    pub fn detail(&self) -> Option<&Value> {
        match self {
            SubmitFailure::Status { body, .. } => body.as_ref(),
            SubmitFailure::Rejected(body) => Some(body),
            _ => None,
        }
    }
}

impl fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitFailure::Unreachable(reason) => write!(f, "server unreachable: {}", reason),
            SubmitFailure::Status { status, body } => {
                match body.as_ref().and_then(protocol::error_message) {
                    Some(message) => write!(f, "HTTP {}: {}", status, message),
                    None => write!(f, "HTTP {}", status),
                }
            }
            SubmitFailure::Rejected(body) => match protocol::error_message(body) {
                Some(message) => write!(f, "{}", message),
                None => write!(f, "error response: {}", body),
            },
            SubmitFailure::InvalidBody { status } => {
                write!(f, "HTTP {} without a JSON body", status)
            }
            SubmitFailure::InvalidRequest(reason) => write!(f, "invalid request: {}", reason),
        }
    }
}

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// Created; carries the server's response body.
    Accepted(Value),
    Failed(SubmitFailure),
}

impl SubmitResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitResult::Accepted(_))
    }
}

/// Turn a transport result into a submission outcome.
pub fn interpret(result: TransportResult<Response>) -> SubmitResult {
    let response = match result {
        Ok(response) => response,
        Err(TransportError::SerializationError(reason)) => {
            return SubmitResult::Failed(SubmitFailure::InvalidRequest(reason));
        }
        Err(e) => return SubmitResult::Failed(SubmitFailure::Unreachable(e.to_string())),
    };

    if !response.is_success() {
        return SubmitResult::Failed(SubmitFailure::Status {
            status: response.status,
            body: response.body,
        });
    }

    match response.body {
        None => SubmitResult::Failed(SubmitFailure::InvalidBody {
            status: response.status,
        }),
        Some(body) => match protocol::classify(&body) {
            ResponseKind::Created => SubmitResult::Accepted(body),
            ResponseKind::ErrorShaped => SubmitResult::Failed(SubmitFailure::Rejected(body)),
        },
    }
}

/// Client for the create-resource endpoint.
pub struct SyncClient<T: Transport = HttpTransport> {
    /// Full URL of the endpoint.
    url: String,
    /// Transport layer.
    transport: T,
}

impl SyncClient<HttpTransport> {
    /// Create a new sync client with the default HTTP transport.
    pub fn new(url: impl Into<String>) -> Self {
        SyncClient {
            url: url.into(),
            transport: HttpTransport::new(),
        }
    }
}

impl<T: Transport> SyncClient<T> {
    /// Create a new sync client with custom transport (for testing).
    pub fn with_transport(url: impl Into<String>, transport: T) -> Self {
        SyncClient {
            url: url.into(),
            transport,
        }
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submit every record's payload as one JSON array.
    pub async fn submit_batch(&self, records: &[QueuedRecord]) -> SubmitResult {
        let batch: Vec<Value> = records.iter().map(|r| r.payload.clone()).collect();
        self.submit(Value::Array(batch)).await
    }

    /// Submit a single payload.
    pub async fn submit_one(&self, payload: &Value) -> SubmitResult {
        self.submit(payload.clone()).await
    }

    async fn submit(&self, body: Value) -> SubmitResult {
        let result = self.transport.post_json(&self.url, body).await;
        let outcome = interpret(result);
        if let SubmitResult::Failed(ref failure) = outcome {
            tracing::debug!(url = %self.url, %failure, "submission failed");
        }
        outcome
    }
}
