//! Toolkit Errors
//!
//! Only resource operations fail. Malformed musical or grammar input is
//! degraded silently, and absence (missing component, unreachable goal) is
//! reported with `Option` or an empty collection.

use thiserror::Error;

/// Errors surfaced by the toolkit.
#[derive(Debug, Error)]
pub enum KitError {
    /// Configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[source] serde_json::Error),

    /// A grammar rule table could not be parsed.
    #[error("invalid grammar rules: {0}")]
    Grammar(#[source] serde_json::Error),

    /// A value could not be encoded for storage.
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        /// Storage key being written.
        key: String,
        /// Underlying encoder error.
        #[source]
        source: serde_json::Error,
    },

    /// An asset failed to load.
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Asset loading failure, reported by the host loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// The source does not exist.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The source exists but could not be decoded.
    #[error("failed to decode asset {src}: {reason}")]
    Decode {
        /// Asset source.
        src: String,
        /// Host-provided reason.
        reason: String,
    },
}

/// Result alias for toolkit operations.
pub type KitResult<T> = Result<T, KitError>;
