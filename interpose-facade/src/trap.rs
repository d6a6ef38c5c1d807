use crate::{BackingStore, FacadeResult, Operation};
use interpose_types::Key;
use std::fmt;

/// Handlers for the five operations a [`Facade`](crate::Facade) mediates.
///
/// Every method has a pass-through default, so an implementation overrides
/// only the operations it wants to intercept. Handlers receive the raw
/// backing store, never the facade, which is what keeps a handler that
/// falls back to default behavior from re-entering itself.
///
/// Errors returned by a handler reach the facade's caller unchanged.
pub trait TrapSet<V: Clone>: Send + Sync {
    /// Checked once by `Facade::create`. Return `Err` to refuse construction.
    fn validate(&self) -> FacadeResult<()> {
        Ok(())
    }

    /// Returns `Ok(None)` for an absent key.
    fn read(&self, store: &BackingStore<V>, key: &Key) -> FacadeResult<Option<V>> {
        Ok(store.get(key).cloned())
    }

    fn write(&mut self, store: &mut BackingStore<V>, key: Key, value: V) -> FacadeResult<()> {
        store.set(key, value);
        Ok(())
    }

    /// Deleting an absent key is not an error.
    fn delete(&mut self, store: &mut BackingStore<V>, key: &Key) -> FacadeResult<()> {
        store.remove(key);
        Ok(())
    }

    fn contains(&self, store: &BackingStore<V>, key: &Key) -> FacadeResult<bool> {
        Ok(store.has_key(key))
    }

    fn enumerate(&self, store: &BackingStore<V>) -> FacadeResult<Vec<Key>> {
        Ok(store.keys().cloned().collect())
    }
}

/// A trap set that intercepts nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl<V: Clone> TrapSet<V> for PassThrough {}

impl<V: Clone, T: TrapSet<V> + ?Sized> TrapSet<V> for Box<T> {
    fn validate(&self) -> FacadeResult<()> {
        (**self).validate()
    }

    fn read(&self, store: &BackingStore<V>, key: &Key) -> FacadeResult<Option<V>> {
        (**self).read(store, key)
    }

    fn write(&mut self, store: &mut BackingStore<V>, key: Key, value: V) -> FacadeResult<()> {
        (**self).write(store, key, value)
    }

    fn delete(&mut self, store: &mut BackingStore<V>, key: &Key) -> FacadeResult<()> {
        (**self).delete(store, key)
    }

    fn contains(&self, store: &BackingStore<V>, key: &Key) -> FacadeResult<bool> {
        (**self).contains(store, key)
    }

    fn enumerate(&self, store: &BackingStore<V>) -> FacadeResult<Vec<Key>> {
        (**self).enumerate(store)
    }
}

type ReadFn<V> = Box<dyn Fn(&BackingStore<V>, &Key) -> FacadeResult<Option<V>> + Send + Sync>;
type WriteFn<V> = Box<dyn FnMut(&mut BackingStore<V>, Key, V) -> FacadeResult<()> + Send + Sync>;
type DeleteFn<V> = Box<dyn FnMut(&mut BackingStore<V>, &Key) -> FacadeResult<()> + Send + Sync>;
type ContainsFn<V> = Box<dyn Fn(&BackingStore<V>, &Key) -> FacadeResult<bool> + Send + Sync>;
type EnumerateFn<V> = Box<dyn Fn(&BackingStore<V>) -> FacadeResult<Vec<Key>> + Send + Sync>;

/// A trap set assembled from closures.
///
/// Each handler is independently optional; a missing one passes through.
///
/// ```
/// use interpose_facade::{BackingStore, Facade, Traps};
/// use serde_json::{json, Value};
///
/// let traps = Traps::<Value>::new().on_read(|store, key| {
///     Ok(store.get(key).cloned().or(Some(json!("n/a"))))
/// });
/// let facade = Facade::create(BackingStore::new(), traps).unwrap();
/// assert_eq!(facade.read("anything").unwrap(), Some(json!("n/a")));
/// ```
pub struct Traps<V> {
    read: Option<ReadFn<V>>,
    write: Option<WriteFn<V>>,
    delete: Option<DeleteFn<V>>,
    contains: Option<ContainsFn<V>>,
    enumerate: Option<EnumerateFn<V>>,
}

impl<V> Default for Traps<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Traps<V> {
    /// Creates a trap set with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            read: None,
            write: None,
            delete: None,
            contains: None,
            enumerate: None,
        }
    }

    pub fn on_read<F>(mut self, f: F) -> Self
    where
        F: Fn(&BackingStore<V>, &Key) -> FacadeResult<Option<V>> + Send + Sync + 'static,
    {
        self.read = Some(Box::new(f));
        self
    }

    pub fn on_write<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut BackingStore<V>, Key, V) -> FacadeResult<()> + Send + Sync + 'static,
    {
        self.write = Some(Box::new(f));
        self
    }

    pub fn on_delete<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut BackingStore<V>, &Key) -> FacadeResult<()> + Send + Sync + 'static,
    {
        self.delete = Some(Box::new(f));
        self
    }

    pub fn on_contains<F>(mut self, f: F) -> Self
    where
        F: Fn(&BackingStore<V>, &Key) -> FacadeResult<bool> + Send + Sync + 'static,
    {
        self.contains = Some(Box::new(f));
        self
    }

    pub fn on_enumerate<F>(mut self, f: F) -> Self
    where
        F: Fn(&BackingStore<V>) -> FacadeResult<Vec<Key>> + Send + Sync + 'static,
    {
        self.enumerate = Some(Box::new(f));
        self
    }

    /// Returns true if a handler is installed for `operation`.
    #[must_use]
    pub fn intercepts(&self, operation: Operation) -> bool {
        match operation {
            Operation::Read => self.read.is_some(),
            Operation::Write => self.write.is_some(),
            Operation::Delete => self.delete.is_some(),
            Operation::Contains => self.contains.is_some(),
            Operation::Enumerate => self.enumerate.is_some(),
        }
    }
}

impl<V> fmt::Debug for Traps<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trapped: Vec<&str> = Operation::ALL
            .iter()
            .filter(|op| self.intercepts(**op))
            .map(Operation::name)
            .collect();
        f.debug_struct("Traps").field("trapped", &trapped).finish()
    }
}

impl<V: Clone> TrapSet<V> for Traps<V> {
    fn read(&self, store: &BackingStore<V>, key: &Key) -> FacadeResult<Option<V>> {
        match &self.read {
            Some(f) => f(store, key),
            None => PassThrough.read(store, key),
        }
    }

    fn write(&mut self, store: &mut BackingStore<V>, key: Key, value: V) -> FacadeResult<()> {
        match &mut self.write {
            Some(f) => f(store, key, value),
            None => PassThrough.write(store, key, value),
        }
    }

    fn delete(&mut self, store: &mut BackingStore<V>, key: &Key) -> FacadeResult<()> {
        match &mut self.delete {
            Some(f) => f(store, key),
            None => PassThrough.delete(store, key),
        }
    }

    fn contains(&self, store: &BackingStore<V>, key: &Key) -> FacadeResult<bool> {
        match &self.contains {
            Some(f) => f(store, key),
            None => PassThrough.contains(store, key),
        }
    }

    fn enumerate(&self, store: &BackingStore<V>) -> FacadeResult<Vec<Key>> {
        match &self.enumerate {
            Some(f) => f(store),
            None => PassThrough.enumerate(store),
        }
    }
}
