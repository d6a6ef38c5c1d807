//! Property keys.
//!
//! Keys come in two flavours: string names, which represent data fields, and
//! opaque tokens, which represent collision-free extension points. A name and
//! a token are never equal, even when the token's label spells the name.

use crate::OpaqueToken;
use serde::{Serialize, Serializer};
use std::fmt;

/// A key in a backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A string-named data field.
    Name(String),
    /// An identity-compared token.
    Token(OpaqueToken),
}

impl Key {
    /// Creates a name key.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Returns the name if this is a name key.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Token(_) => None,
        }
    }

    /// Returns the token if this is a token key.
    #[must_use]
    pub fn as_token(&self) -> Option<&OpaqueToken> {
        match self {
            Self::Name(_) => None,
            Self::Token(token) => Some(token),
        }
    }

    #[must_use]
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    /// Returns true if this is the name key `name`.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.as_name() == Some(name)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<OpaqueToken> for Key {
    fn from(token: OpaqueToken) -> Self {
        Self::Token(token)
    }
}

impl From<&OpaqueToken> for Key {
    fn from(token: &OpaqueToken) -> Self {
        Self::Token(token.clone())
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.is_named(other)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.is_named(other)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Token(token) => write!(f, "{token}"),
        }
    }
}

/// Keys serialize to their display form. Tokens serialize for inspection
/// only; there is no `Deserialize` because a token cannot be rebuilt from
/// text.
impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Name(name) => serializer.serialize_str(name),
            Self::Token(token) => serializer.collect_str(token),
        }
    }
}
