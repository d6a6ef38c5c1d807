//! Audit-logging trap set.
//!
//! Every successful write is recorded as `{key, value, timestamp}`. The log
//! is served through a virtual key (`"history"` by default) that reads as
//! the log, reports as present, ignores writes and refuses deletes.

use crate::{
    BackingStore, FacadeError, FacadeResult, Operation, Outcome, TracingObserver, TrapEvent,
    TrapObserver, TrapSet,
};
use interpose_types::{AuditClock, AuditTimestamp, Key};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;

/// Name of the virtual key that serves the audit log.
pub const DEFAULT_HISTORY_KEY: &str = "history";

/// One recorded write. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditLogEntry<V> {
    pub key: Key,
    pub value: V,
    pub timestamp: AuditTimestamp,
}

impl AuditLogEntry<Value> {
    fn to_value(&self) -> Value {
        json!({
            "key": self.key.to_string(),
            "value": self.value,
            "timestamp": {
                "wall_time": self.timestamp.wall_time(),
                "logical": self.timestamp.logical(),
            },
        })
    }
}

/// Records every write and exposes the record as a read-only virtual key.
///
/// Writing to the history key is silently ignored (the observer sees
/// [`Outcome::Ignored`]); deleting it fails with
/// [`FacadeError::ProtectedKey`].
pub struct AuditingPolicy {
    history_key: String,
    log: Vec<AuditLogEntry<Value>>,
    clock: AuditClock,
    observer: Arc<dyn TrapObserver>,
}

impl Default for AuditingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditingPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self {
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            log: Vec::new(),
            clock: AuditClock::new(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Serves the log under `key` instead of `"history"`.
    #[must_use]
    pub fn with_history_key(mut self, key: impl Into<String>) -> Self {
        self.history_key = key.into();
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TrapObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn history_key(&self) -> &str {
        &self.history_key
    }

    /// The log, oldest write first.
    pub fn history(&self) -> &[AuditLogEntry<Value>] {
        &self.log
    }

    fn is_history(&self, key: &Key) -> bool {
        key.is_named(&self.history_key)
    }

    fn history_value(&self) -> Value {
        Value::Array(self.log.iter().map(AuditLogEntry::to_value).collect())
    }

    fn notify(&self, operation: Operation, key: Option<&Key>, outcome: Outcome) {
        self.observer.observe(&TrapEvent::new(operation, key, outcome));
    }
}

impl fmt::Debug for AuditingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditingPolicy")
            .field("history_key", &self.history_key)
            .field("entries", &self.log.len())
            .finish_non_exhaustive()
    }
}

impl TrapSet<Value> for AuditingPolicy {
    fn validate(&self) -> FacadeResult<()> {
        if self.history_key.is_empty() {
            return Err(FacadeError::Misconfigured(
                "history key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn read(&self, store: &BackingStore<Value>, key: &Key) -> FacadeResult<Option<Value>> {
        if self.is_history(key) {
            self.notify(Operation::Read, Some(key), Outcome::Virtual);
            return Ok(Some(self.history_value()));
        }
        self.notify(Operation::Read, Some(key), Outcome::PassedThrough);
        Ok(store.get(key).cloned())
    }

    fn write(
        &mut self,
        store: &mut BackingStore<Value>,
        key: Key,
        value: Value,
    ) -> FacadeResult<()> {
        if self.is_history(&key) {
            self.notify(Operation::Write, Some(&key), Outcome::Ignored);
            return Ok(());
        }
        store.set(key.clone(), value.clone());
        let timestamp = self.clock.next();
        self.notify(Operation::Write, Some(&key), Outcome::PassedThrough);
        self.log.push(AuditLogEntry {
            key,
            value,
            timestamp,
        });
        Ok(())
    }

    fn delete(&mut self, store: &mut BackingStore<Value>, key: &Key) -> FacadeResult<()> {
        if self.is_history(key) {
            self.notify(Operation::Delete, Some(key), Outcome::Refused);
            return Err(FacadeError::ProtectedKey {
                key: key.to_string(),
            });
        }
        self.notify(Operation::Delete, Some(key), Outcome::PassedThrough);
        store.remove(key);
        Ok(())
    }

    fn contains(&self, store: &BackingStore<Value>, key: &Key) -> FacadeResult<bool> {
        if self.is_history(key) {
            self.notify(Operation::Contains, Some(key), Outcome::Virtual);
            return Ok(true);
        }
        self.notify(Operation::Contains, Some(key), Outcome::PassedThrough);
        Ok(store.has_key(key))
    }

    /// A stored entry under the history key is shadowed by the log, so it
    /// is left out along with the virtual key itself.
    fn enumerate(&self, store: &BackingStore<Value>) -> FacadeResult<Vec<Key>> {
        self.notify(Operation::Enumerate, None, Outcome::PassedThrough);
        Ok(store
            .keys()
            .filter(|key| !self.is_history(key))
            .cloned()
            .collect())
    }
}
