// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Response classification for the create-resource endpoint.
//!
//! The server answers failed creates with a JSON object carrying a `message`
//! (and for validation failures an `errors` map), sometimes with a 2xx status.
//! A successful create returns the created resource, or a list of them for a
//! batch.

use serde_json::Value;

/// Fields whose presence marks a response body as an error.
pub const ERROR_FIELDS: &[&str] = &["message", "errors"];

/// How a response from the create-resource endpoint should be treated.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseKind {
    /// The resources were created.
    Created,
    /// The server answered, but with an error-shaped body.
    ErrorShaped,
}

/// Returns true if `body` is an object carrying any of [`ERROR_FIELDS`].
pub fn is_error_shaped(body: &Value) -> bool {
    body.as_object()
        .is_some_and(|obj| ERROR_FIELDS.iter().any(|field| obj.contains_key(*field)))
}

/// Classify a JSON response body.
pub fn classify(body: &Value) -> ResponseKind {
    if is_error_shaped(body) {
        ResponseKind::ErrorShaped
    } else {
        ResponseKind::Created
    }
}

/// Best-effort human-readable error text from an error-shaped body.
pub fn error_message(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
