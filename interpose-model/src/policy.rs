use crate::{FieldCheck, ModelResult};
use interpose_facade::{BackingStore, FacadeError, FacadeResult, Key, PassThrough, TrapSet};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Trap set that rejects writes whose value fails the field's checks.
///
/// Checks apply to named keys only; token keys and fields without checks
/// are written unconditionally. Every other operation, and every accepted
/// write, is forwarded to the wrapped trap set, so validation can sit on
/// top of an `AuditingPolicy` and keep rejected values out of its log.
///
/// ```
/// use interpose_facade::{BackingStore, Facade};
/// use interpose_model::{FieldCheck, ValidatingPolicy};
/// use serde_json::json;
///
/// let policy = ValidatingPolicy::new(vec![FieldCheck::date_string("birthdate")]);
/// let mut user = Facade::create(BackingStore::new(), policy).unwrap();
///
/// user.write("birthdate", json!("12/19/1979")).unwrap();
/// assert!(user.write("birthdate", json!("yesterday")).is_err());
/// ```
#[derive(Debug)]
pub struct ValidatingPolicy<T = PassThrough> {
    checks: Vec<FieldCheck>,
    inner: T,
}

#[derive(Deserialize)]
struct CheckList {
    #[serde(default, rename = "check")]
    checks: Vec<FieldCheck>,
}

impl ValidatingPolicy<PassThrough> {
    pub fn new(checks: Vec<FieldCheck>) -> Self {
        Self {
            checks,
            inner: PassThrough,
        }
    }

    /// Parses `[[check]]` tables:
    ///
    /// ```toml
    /// [[check]]
    /// field = "fname"
    /// kind = "non-empty-string"
    /// ```
    pub fn from_toml_str(contents: &str) -> ModelResult<Self> {
        let list: CheckList = toml::from_str(contents)?;
        Ok(Self::new(list.checks))
    }

    /// Parses a JSON array of checks.
    pub fn from_json_str(contents: &str) -> ModelResult<Self> {
        Ok(Self::new(serde_json::from_str(contents)?))
    }
}

impl<T> ValidatingPolicy<T> {
    /// Forwards accepted operations to `inner` instead of the store.
    pub fn over<U>(self, inner: U) -> ValidatingPolicy<U> {
        ValidatingPolicy {
            checks: self.checks,
            inner,
        }
    }

    pub fn checks(&self) -> &[FieldCheck] {
        &self.checks
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    fn first_failure(&self, key: &Key, value: &Value) -> Option<&FieldCheck> {
        let name = key.as_name()?;
        self.checks
            .iter()
            .filter(|check| check.field == name)
            .find(|check| !check.passes(Some(value)))
    }
}

impl<T: TrapSet<Value>> TrapSet<Value> for ValidatingPolicy<T> {
    fn validate(&self) -> FacadeResult<()> {
        if self.checks.iter().any(|check| check.field.is_empty()) {
            return Err(FacadeError::Misconfigured(
                "check with an empty field name".to_string(),
            ));
        }
        self.inner.validate()
    }

    fn read(&self, store: &BackingStore<Value>, key: &Key) -> FacadeResult<Option<Value>> {
        self.inner.read(store, key)
    }

    fn write(
        &mut self,
        store: &mut BackingStore<Value>,
        key: Key,
        value: Value,
    ) -> FacadeResult<()> {
        if let Some(failed) = self.first_failure(&key, &value) {
            debug!(key = %key, check = %failed.check, "write rejected");
            return Err(FacadeError::rejected(&key, format!("failed {} check", failed.check)));
        }
        self.inner.write(store, key, value)
    }

    fn delete(&mut self, store: &mut BackingStore<Value>, key: &Key) -> FacadeResult<()> {
        self.inner.delete(store, key)
    }

    fn contains(&self, store: &BackingStore<Value>, key: &Key) -> FacadeResult<bool> {
        self.inner.contains(store, key)
    }

    fn enumerate(&self, store: &BackingStore<Value>) -> FacadeResult<Vec<Key>> {
        self.inner.enumerate(store)
    }
}
