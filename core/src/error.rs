//! Error Types
//!
//! The whole remote surface of the game collapses into one practical
//! category: [`NetworkError`]. Connectivity failures, non-success statuses
//! and malformed bodies are handled identically by the engine: the
//! triggering intent has no visible effect beyond an error message, and the
//! player retries manually.

use thiserror::Error;

/// Error talking to a remote service (catalog or score store).
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Transport-level failure: connect, timeout, or body read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{service} returned {status}")]
    Status {
        /// Which remote service answered.
        service: &'static str,
        /// The HTTP status code.
        status: reqwest::StatusCode,
    },

    /// The response body did not match the expected shape.
    #[error("malformed response from {service}: {detail}")]
    Malformed {
        /// Which remote service answered.
        service: &'static str,
        /// What was wrong with the body.
        detail: String,
    },
}
