//! The five operations a facade mediates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation that can be intercepted by a trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Read,
    Write,
    Delete,
    Contains,
    Enumerate,
}

impl Operation {
    /// All operations, in the order the facade documents them.
    pub const ALL: [Operation; 5] = [
        Self::Read,
        Self::Write,
        Self::Delete,
        Self::Contains,
        Self::Enumerate,
    ];

    /// Returns the stable name used in logs and config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Contains => "contains",
            Self::Enumerate => "enumerate",
        }
    }

    /// Returns true for operations that mutate the store.
    ///
    /// `SharedFacade` takes its exclusive lock for exactly these.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Write | Self::Delete)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
