//! Thread-safe facade handle.
//!
//! Writes and deletes hold the exclusive lock for the whole trap call, so a
//! trap that mutates the store and appends to a log does both before any
//! other mutation starts. Reads, membership checks and enumeration share the
//! lock with each other but never overlap a mutation.

use crate::{BackingStore, Facade, FacadeResult, PassThrough, TrapSet};
use interpose_types::Key;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

/// A cloneable, lock-protected [`Facade`].
#[derive(Debug)]
pub struct SharedFacade<V = Value, T = PassThrough> {
    inner: Arc<RwLock<Facade<V, T>>>,
}

impl<V, T> Clone for SharedFacade<V, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone, T: TrapSet<V>> SharedFacade<V, T> {
    /// Validates and wraps, like [`Facade::create`].
    pub fn create(store: BackingStore<V>, traps: T) -> FacadeResult<Self> {
        Ok(Self::new(Facade::create(store, traps)?))
    }

    pub fn new(facade: Facade<V, T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(facade)),
        }
    }

    pub fn read(&self, key: impl Into<Key>) -> FacadeResult<Option<V>> {
        self.inner.read().read(key)
    }

    pub fn write(&self, key: impl Into<Key>, value: V) -> FacadeResult<()> {
        self.inner.write().write(key, value)
    }

    pub fn delete(&self, key: impl Into<Key>) -> FacadeResult<()> {
        self.inner.write().delete(key)
    }

    pub fn contains(&self, key: impl Into<Key>) -> FacadeResult<bool> {
        self.inner.read().contains(key)
    }

    pub fn enumerate(&self) -> FacadeResult<Vec<Key>> {
        self.inner.read().enumerate()
    }

    /// Runs `f` against the facade under the shared lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&Facade<V, T>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Returns the facade if this is the last handle.
    pub fn try_into_inner(self) -> Result<Facade<V, T>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}
