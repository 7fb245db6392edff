use std::time::Duration;

use thiserror::Error;

/// Every variant collapses into the "server unreachable" state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Server returned an error: {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}
