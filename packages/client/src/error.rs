//! Error types for the gateway client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The gateway rejected the session token during the handshake
    #[error("Authentication rejected by the gateway (check the token)")]
    AuthenticationRejected,

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
