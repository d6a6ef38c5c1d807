//! Error types for the facade and its trap sets.

use thiserror::Error;

/// Result type for facade operations.
pub type FacadeResult<T> = Result<T, FacadeError>;

/// Errors surfaced by a facade operation.
///
/// The facade itself only produces `Misconfigured`; every other variant is
/// raised by a trap set and passed through to the caller unchanged.
#[derive(Debug, Error)]
pub enum FacadeError {
    /// A delete trap refused to remove a reserved key.
    #[error("protected key: '{key}' cannot be deleted")]
    ProtectedKey { key: String },

    /// A write trap refused to overwrite a read-only key.
    #[error("read-only key: '{key}' cannot be written")]
    ReadOnly { key: String },

    /// A read of an absent key under a policy that treats absence as an error.
    #[error("missing key: '{key}'")]
    MissingKey { key: String },

    /// A trap rejected the operation for a policy-specific reason.
    #[error("rejected '{key}': {reason}")]
    Rejected { key: String, reason: String },

    /// The trap set failed validation at construction time.
    #[error("misconfigured trap set: {0}")]
    Misconfigured(String),

    /// Policy file could not be parsed.
    #[error("policy config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Policy file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FacadeError {
    /// Shorthand for a `Rejected` error.
    pub fn rejected(key: impl ToString, reason: impl Into<String>) -> Self {
        Self::Rejected {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true for the `ProtectedKey` variant.
    #[must_use]
    pub fn is_protected_key(&self) -> bool {
        matches!(self, Self::ProtectedKey { .. })
    }
}
