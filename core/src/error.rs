//! The single error kind of the catalog client.
//!
//! # Design
//! Callers never branch on why a request failed: transport failure, a
//! non-2xx status, and an undecodable body all end the same way (one alert,
//! previous state kept). The message is kept for logs only.

use thiserror::Error;

use crate::http::HttpResponse;

/// How much of an error response body ends up in the log message.
const STATUS_BODY_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("network error: {message}")]
pub struct NetworkError {
    message: String,
}

impl NetworkError {
    pub fn transport(reason: impl std::fmt::Display) -> Self {
        Self {
            message: format!("transport failed: {reason}"),
        }
    }

    /// Keeps only the first `STATUS_BODY_LIMIT` characters of the body.
    pub fn status(response: &HttpResponse) -> Self {
        let mut excerpt: String = response.body.chars().take(STATUS_BODY_LIMIT).collect();
        if excerpt.len() < response.body.len() {
            excerpt.push_str("...");
        }
        Self {
            message: format!("HTTP {}: {}", response.status, excerpt),
        }
    }

    pub fn decode(reason: impl std::fmt::Display) -> Self {
        Self {
            message: format!("decoding failed: {reason}"),
        }
    }

    pub fn encode(reason: impl std::fmt::Display) -> Self {
        Self {
            message: format!("encoding failed: {reason}"),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
