//! Lookup error taxonomy.

use thiserror::Error;

/// Why a current-weather lookup failed.
///
/// Callers render only the `Display` string. `Provider`'s message is shown
/// verbatim on error cards, so it carries no prefix: it is the provider's
/// own `message` field when present, else `HTTP <status>`.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport-level failure before a response was received.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the provider.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// 2xx response whose body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl LookupError {
    /// HTTP status of a provider rejection, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            LookupError::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }
}
