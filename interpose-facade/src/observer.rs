//! Injectable observers for trap diagnostics.
//!
//! Trap sets report what they did through a [`TrapObserver`] instead of
//! writing to a console, so callers choose where diagnostics go and tests can
//! assert on the exact call sequence.

use crate::Operation;
use interpose_types::Key;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// What a trap did with a mediated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Forwarded to the backing store.
    PassedThrough,
    /// Served by the trap without touching the store.
    Virtual,
    /// Dropped on purpose; the caller sees success.
    Ignored,
    /// Refused; the caller sees an error.
    Refused,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PassedThrough => "passed-through",
            Self::Virtual => "virtual",
            Self::Ignored => "ignored",
            Self::Refused => "refused",
        })
    }
}

/// One observed trap invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrapEvent {
    pub operation: Operation,
    /// `None` for `enumerate`, which has no key.
    pub key: Option<Key>,
    pub outcome: Outcome,
}

impl TrapEvent {
    #[must_use]
    pub fn new(operation: Operation, key: Option<&Key>, outcome: Outcome) -> Self {
        Self {
            operation,
            key: key.cloned(),
            outcome,
        }
    }
}

/// Receives trap events.
pub trait TrapObserver: Send + Sync {
    fn observe(&self, event: &TrapEvent);
}

/// Forwards every event to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TrapObserver for TracingObserver {
    fn observe(&self, event: &TrapEvent) {
        match &event.key {
            Some(key) => debug!(
                operation = %event.operation,
                key = %key,
                outcome = %event.outcome,
                "trap invoked"
            ),
            None => debug!(
                operation = %event.operation,
                outcome = %event.outcome,
                "trap invoked"
            ),
        }
    }
}

/// Records events in memory.
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to a trap set.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<TrapEvent>>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<TrapEvent> {
        self.events.lock().clone()
    }

    /// Operations recorded so far, in order.
    #[must_use]
    pub fn operations(&self) -> Vec<Operation> {
        self.events.lock().iter().map(|e| e.operation).collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl TrapObserver for RecordingObserver {
    fn observe(&self, event: &TrapEvent) {
        self.events.lock().push(event.clone());
    }
}
