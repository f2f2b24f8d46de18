//! Errors produced by the GitHub remote capabilities
//!
//! This is the only error kind that originates outside the process. The query
//! coordinator catches it at its boundary, so nothing above it ever sees one
//! as a failure path - only as an optional flag to display.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A failed remote query (network, HTTP status, rate limit, malformed body)
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteQueryError {
    /// Transport-level failure: DNS, connection refused, timeout
    #[error("network error: {message}")]
    Network { message: String },

    /// Non-2xx response that is not a rate limit
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Rate limit exceeded (primary or secondary)
    #[error("rate limit exceeded{}", reset_suffix(.reset_at))]
    RateLimited { reset_at: Option<DateTime<Utc>> },

    /// Response body did not match the expected shape
    #[error("unexpected response: {message}")]
    Decode { message: String },
}

fn reset_suffix(reset_at: &Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(at) => format!(", resets at {}", at.format("%H:%M:%S UTC")),
        None => String::new(),
    }
}

impl RemoteQueryError {
    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[inline]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    #[inline]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Short label for the status bar
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Http { .. } => "http",
            Self::RateLimited { .. } => "rate-limited",
            Self::Decode { .. } => "decode",
        }
    }
}

impl From<reqwest::Error> for RemoteQueryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::http(status.as_u16(), err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}
