//! Core type definitions for interpose.
//!
//! This crate defines the key vocabulary shared by the facade and its
//! consumers:
//! - Property keys, either string names or opaque tokens
//! - Opaque tokens (collision-free, identity-compared keys) and a registry
//!   for sharing tokens by name
//! - Monotonic audit timestamps
//!
//! Nothing here knows about interception; that lives in `interpose-facade`.

mod key;
mod timestamp;
mod token;

pub use key::Key;
pub use timestamp::{AuditClock, AuditTimestamp};
pub use token::{OpaqueToken, TokenRegistry};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
