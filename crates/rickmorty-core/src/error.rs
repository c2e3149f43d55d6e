//! Error types shared across the catalog client crates

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Catalog API Errors
    // ─────────────────────────────────────────────────────────────
    /// Network/connectivity failure before a body could be decoded.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The server reported a structured error envelope (`{"error": "..."}`).
    #[error("{message}")]
    Remote { message: String },

    // ─────────────────────────────────────────────────────────────
    // Favourites Store Errors
    // ─────────────────────────────────────────────────────────────
    #[error("storage error: {message}")]
    Storage { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Server-reported errors carry a message meant for display as-is;
    /// everything else renders through its `Display` impl.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
