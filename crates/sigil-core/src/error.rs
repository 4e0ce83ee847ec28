// crates/sigil-core/src/error.rs
//
// Workspace-wide error type.

use thiserror::Error;

/// Workspace-wide error type for the Sigil scoring engine.
///
/// The scoring math itself never fails for data-shape reasons; these
/// variants cover the gathering/adapter/config boundaries where real
/// failures can occur.
#[derive(Debug, Error)]
pub enum SigilError {
    /// Input-gathering error (upstream fetch failed past all retries).
    #[error("Gather error: {0}")]
    Gather(String),

    /// Adapter error (upstream payload could not be normalized).
    #[error("Adapter error: {0}")]
    Adapter(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (weights/thresholds file unreadable or invalid).
    #[error("Config error: {0}")]
    Config(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for SigilError {
    fn from(e: serde_json::Error) -> Self {
        SigilError::Serialization(e.to_string())
    }
}
