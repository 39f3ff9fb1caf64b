/**
* filename : error
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VwapError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Feed error: {0}")]
    FeedError(String),

    #[error("Sink error: {0}")]
    SinkError(String),

    #[error("WebSocket error: {0}")]
    WebSocketError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
