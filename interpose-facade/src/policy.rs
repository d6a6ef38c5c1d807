//! Config-driven trap set.
//!
//! A `policy.toml` declares per-key rules that play the role of property
//! descriptors: hidden keys are left out of enumeration, read-only keys
//! refuse writes, protected keys refuse deletes. An optional `[audit]`
//! section layers an [`AuditingPolicy`] underneath the rules.
//!
//! ```toml
//! hidden = ["middleName"]
//! read-only = ["age"]
//! protected = ["id"]
//! read-only-mode = "reject"
//! strict-reads = false
//!
//! [audit]
//! enabled = true
//! history-key = "history"
//! ```

use crate::audit::DEFAULT_HISTORY_KEY;
use crate::{
    AuditingPolicy, BackingStore, FacadeError, FacadeResult, Operation, Outcome, TracingObserver,
    TrapEvent, TrapObserver, TrapSet,
};
use interpose_types::Key;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// What a write to a read-only key does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadOnlyMode {
    #[default]
    /// Drop the write and report success.
    Ignore,
    /// Fail with `FacadeError::ReadOnly`.
    Reject,
}

/// Audit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuditConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_history_key")]
    pub history_key: String,
}

fn default_history_key() -> String {
    DEFAULT_HISTORY_KEY.to_string()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            history_key: default_history_key(),
        }
    }
}

/// Policy configuration parsed from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyConfig {
    /// Keys omitted from `enumerate` (they still read and report as present).
    #[serde(default)]
    pub hidden: Vec<String>,
    /// Keys whose writes are dropped or rejected, per `read_only_mode`.
    #[serde(default)]
    pub read_only: Vec<String>,
    /// Keys whose deletes fail with `ProtectedKey`.
    #[serde(default)]
    pub protected: Vec<String>,
    #[serde(default)]
    pub read_only_mode: ReadOnlyMode,
    /// Reads of absent keys fail with `MissingKey` instead of returning `None`.
    #[serde(default)]
    pub strict_reads: bool,
    #[serde(default)]
    pub audit: AuditConfig,
}

impl PolicyConfig {
    /// Parses a policy from TOML text.
    pub fn from_toml_str(contents: &str) -> FacadeResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads a policy file, failing on any read or parse error.
    pub fn try_load_from(path: impl AsRef<Path>) -> FacadeResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Loads a policy file.
    /// Falls back to the default (no rules) when the file is missing or bad.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No policy file found at {:?}, using default policy", path);
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => {
                info!("Loaded policy from {:?}", path);
                config
            }
            Err(e) => {
                warn!(
                    "Failed to load policy file {:?}: {}. Falling back to default policy.",
                    path, e
                );
                Self::default()
            }
        }
    }

    /// Checks the rules for contradictions.
    pub fn validate(&self) -> FacadeResult<()> {
        let lists = [
            ("hidden", &self.hidden),
            ("read-only", &self.read_only),
            ("protected", &self.protected),
        ];
        for (name, keys) in lists {
            if keys.iter().any(String::is_empty) {
                return Err(FacadeError::Misconfigured(format!(
                    "empty key name in '{name}'"
                )));
            }
        }

        if self.audit.enabled {
            let history = &self.audit.history_key;
            if history.is_empty() {
                return Err(FacadeError::Misconfigured(
                    "audit history key must not be empty".to_string(),
                ));
            }
            if self.hidden.contains(history) || self.read_only.contains(history) {
                return Err(FacadeError::Misconfigured(format!(
                    "history key '{history}' cannot be hidden or read-only"
                )));
            }
        }
        Ok(())
    }
}

/// Trap set enforcing a [`PolicyConfig`].
///
/// Rule checks run first; anything they let through goes to the audit layer
/// when auditing is enabled, or straight to the store otherwise.
pub struct ConfiguredPolicy {
    config: PolicyConfig,
    hidden: HashSet<String>,
    read_only: HashSet<String>,
    protected: HashSet<String>,
    audit: Option<AuditingPolicy>,
    observer: Arc<dyn TrapObserver>,
}

impl ConfiguredPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        let audit = config
            .audit
            .enabled
            .then(|| AuditingPolicy::new().with_history_key(config.audit.history_key.clone()));
        Self {
            hidden: config.hidden.iter().cloned().collect(),
            read_only: config.read_only.iter().cloned().collect(),
            protected: config.protected.iter().cloned().collect(),
            audit,
            observer: Arc::new(TracingObserver),
            config,
        }
    }

    /// Routes events from both the rules and the audit layer to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TrapObserver>) -> Self {
        self.audit = self
            .audit
            .map(|audit| audit.with_observer(Arc::clone(&observer)));
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// The audit layer, when `[audit] enabled = true`.
    pub fn audit(&self) -> Option<&AuditingPolicy> {
        self.audit.as_ref()
    }

    fn notify(&self, operation: Operation, key: Option<&Key>, outcome: Outcome) {
        self.observer.observe(&TrapEvent::new(operation, key, outcome));
    }
}

fn listed(set: &HashSet<String>, key: &Key) -> bool {
    key.as_name().is_some_and(|name| set.contains(name))
}

impl fmt::Debug for ConfiguredPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredPolicy")
            .field("config", &self.config)
            .field("audit", &self.audit)
            .finish_non_exhaustive()
    }
}

impl TrapSet<Value> for ConfiguredPolicy {
    fn validate(&self) -> FacadeResult<()> {
        self.config.validate()?;
        match &self.audit {
            Some(audit) => audit.validate(),
            None => Ok(()),
        }
    }

    fn read(&self, store: &BackingStore<Value>, key: &Key) -> FacadeResult<Option<Value>> {
        let value = match &self.audit {
            Some(audit) => audit.read(store, key)?,
            None => {
                self.notify(Operation::Read, Some(key), Outcome::PassedThrough);
                store.get(key).cloned()
            }
        };
        if value.is_none() && self.config.strict_reads {
            return Err(FacadeError::MissingKey {
                key: key.to_string(),
            });
        }
        Ok(value)
    }

    fn write(
        &mut self,
        store: &mut BackingStore<Value>,
        key: Key,
        value: Value,
    ) -> FacadeResult<()> {
        if listed(&self.read_only, &key) {
            return match self.config.read_only_mode {
                ReadOnlyMode::Ignore => {
                    self.notify(Operation::Write, Some(&key), Outcome::Ignored);
                    Ok(())
                }
                ReadOnlyMode::Reject => {
                    self.notify(Operation::Write, Some(&key), Outcome::Refused);
                    Err(FacadeError::ReadOnly {
                        key: key.to_string(),
                    })
                }
            };
        }
        if let Some(audit) = self.audit.as_mut() {
            return audit.write(store, key, value);
        }
        self.notify(Operation::Write, Some(&key), Outcome::PassedThrough);
        store.set(key, value);
        Ok(())
    }

    fn delete(&mut self, store: &mut BackingStore<Value>, key: &Key) -> FacadeResult<()> {
        if listed(&self.protected, key) {
            self.notify(Operation::Delete, Some(key), Outcome::Refused);
            return Err(FacadeError::ProtectedKey {
                key: key.to_string(),
            });
        }
        if let Some(audit) = self.audit.as_mut() {
            return audit.delete(store, key);
        }
        self.notify(Operation::Delete, Some(key), Outcome::PassedThrough);
        store.remove(key);
        Ok(())
    }

    fn contains(&self, store: &BackingStore<Value>, key: &Key) -> FacadeResult<bool> {
        match &self.audit {
            Some(audit) => audit.contains(store, key),
            None => {
                self.notify(Operation::Contains, Some(key), Outcome::PassedThrough);
                Ok(store.has_key(key))
            }
        }
    }

    fn enumerate(&self, store: &BackingStore<Value>) -> FacadeResult<Vec<Key>> {
        let keys = match &self.audit {
            Some(audit) => audit.enumerate(store)?,
            None => {
                self.notify(Operation::Enumerate, None, Outcome::PassedThrough);
                store.keys().cloned().collect()
            }
        };
        Ok(keys
            .into_iter()
            .filter(|key| !listed(&self.hidden, key))
            .collect())
    }
}
