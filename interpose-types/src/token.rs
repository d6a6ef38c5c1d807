//! Opaque tokens: collision-free keys compared by identity.
//!
//! A token is unique per creation call. The optional label exists only for
//! diagnostics; two tokens with the same label are still different keys.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// A key that can only be equal to itself.
///
/// Cloning a token yields another handle to the same instance, so clones
/// compare equal. There is no constructor from a label or an
/// id: the only way to obtain a token equal to an existing one is to hold
/// that token (or get it from the [`TokenRegistry`] it was issued by).
#[derive(Clone)]
pub struct OpaqueToken {
    id: Uuid,
    label: Option<Arc<str>>,
}

impl OpaqueToken {
    /// Creates a new unlabeled token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            label: None,
        }
    }

    /// Creates a new token carrying a display label.
    #[must_use]
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: Some(Arc::from(label.into())),
        }
    }

    /// Returns the display label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Default for OpaqueToken {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for OpaqueToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OpaqueToken {}

impl Hash for OpaqueToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for OpaqueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueToken")
            .field("label", &self.label())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for OpaqueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.label().unwrap_or_default())
    }
}

/// Shares tokens by name within one owner.
///
/// `token_for` returns the same token for the same name every time, and
/// `name_for` maps a registered token back to its name. Tokens created
/// outside the registry are never resolvable, even if their label matches a
/// registered name.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    by_name: HashMap<String, OpaqueToken>,
    names: HashMap<OpaqueToken, String>,
}

impl TokenRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the token registered under `name`, creating it on first use.
    pub fn token_for(&mut self, name: &str) -> OpaqueToken {
        if let Some(token) = self.by_name.get(name) {
            return token.clone();
        }
        let token = OpaqueToken::labeled(name);
        self.by_name.insert(name.to_string(), token.clone());
        self.names.insert(token.clone(), name.to_string());
        token
    }

    /// Returns the name a token was registered under.
    #[must_use]
    pub fn name_for(&self, token: &OpaqueToken) -> Option<&str> {
        self.names.get(token).map(String::as_str)
    }

    /// Returns true if a token has been issued for `name`.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
