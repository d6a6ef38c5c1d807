//! Monotonic timestamps for audit logs.
//!
//! Wall-clock milliseconds alone are not enough to order two writes made in
//! the same millisecond, so each timestamp carries a logical counter that
//! breaks ties. An [`AuditClock`] never hands out the same timestamp twice.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A point in time as recorded by an audit log.
///
/// Ordered by `wall_time`, then by `logical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditTimestamp {
    /// Milliseconds since Unix epoch.
    wall_time: u64,
    /// Tie-breaker for timestamps issued within the same millisecond.
    logical: u32,
}

fn wall_clock_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl AuditTimestamp {
    /// Creates a timestamp at the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            wall_time: wall_clock_millis(),
            logical: 0,
        }
    }

    /// Creates a timestamp from components.
    #[must_use]
    pub const fn new(wall_time: u64, logical: u32) -> Self {
        Self { wall_time, logical }
    }

    #[must_use]
    pub const fn wall_time(&self) -> u64 {
        self.wall_time
    }

    #[must_use]
    pub const fn logical(&self) -> u32 {
        self.logical
    }

    /// Returns the next timestamp, strictly greater than `self`.
    ///
    /// Jumps to the wall clock when it has moved past `self`; otherwise bumps
    /// the logical counter, which also covers a wall clock that went
    /// backwards. Saturates at the largest representable timestamp.
    #[must_use]
    pub fn tick(&self) -> Self {
        let now = wall_clock_millis();
        if now > self.wall_time {
            Self {
                wall_time: now,
                logical: 0,
            }
        } else if let Some(logical) = self.logical.checked_add(1) {
            Self {
                wall_time: self.wall_time,
                logical,
            }
        } else {
            match self.wall_time.checked_add(1) {
                Some(wall_time) => Self {
                    wall_time,
                    logical: 0,
                },
                None => *self,
            }
        }
    }

    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl Default for AuditTimestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl PartialOrd for AuditTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AuditTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.wall_time.cmp(&other.wall_time) {
            Ordering::Equal => self.logical.cmp(&other.logical),
            other => other,
        }
    }
}

impl fmt::Display for AuditTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.wall_time, self.logical)
    }
}

impl FromStr for AuditTimestamp {
    type Err = Error;

    /// Parses the `<wall_time>.<logical>` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (wall, logical) = s
            .split_once('.')
            .ok_or_else(|| Error::InvalidTimestamp(format!("missing '.' in {s:?}")))?;
        let wall_time = wall
            .parse()
            .map_err(|e| Error::InvalidTimestamp(format!("wall time {wall:?}: {e}")))?;
        let logical = logical
            .parse()
            .map_err(|e| Error::InvalidTimestamp(format!("logical counter {logical:?}: {e}")))?;
        Ok(Self { wall_time, logical })
    }
}

/// Issues strictly increasing timestamps.
#[derive(Debug, Clone, Default)]
pub struct AuditClock {
    last: Option<AuditTimestamp>,
}

impl AuditClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a timestamp greater than every one issued before.
    pub fn next(&mut self) -> AuditTimestamp {
        let ts = match self.last {
            Some(last) => last.tick(),
            None => AuditTimestamp::now(),
        };
        self.last = Some(ts);
        ts
    }

    /// The most recently issued timestamp.
    #[must_use]
    pub fn last(&self) -> Option<AuditTimestamp> {
        self.last
    }
}
