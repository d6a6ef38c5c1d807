use crate::{BackingStore, FacadeResult, PassThrough, TrapSet};
use interpose_types::Key;
use serde_json::Value;
use tracing::warn;

/// A backing store mediated by a trap set.
///
/// Every read, write, delete, membership check and enumeration goes
/// through `traps`; operations the trap set does not override fall through
/// to the store. The facade owns both, and anything the trap set owns (an
/// audit log, for example) is dropped with it.
#[derive(Debug)]
pub struct Facade<V = Value, T = PassThrough> {
    store: BackingStore<V>,
    traps: T,
}

impl<V: Clone, T: TrapSet<V>> Facade<V, T> {
    /// Wraps `store` with `traps`.
    ///
    /// Fails with `FacadeError::Misconfigured` (or whatever the trap set
    /// reports) if `traps.validate()` fails.
    pub fn create(store: BackingStore<V>, traps: T) -> FacadeResult<Self> {
        if let Err(e) = traps.validate() {
            warn!(error = %e, "rejecting trap set");
            return Err(e);
        }
        Ok(Self { store, traps })
    }

    /// Reads `key`. `Ok(None)` means absent.
    pub fn read(&self, key: impl Into<Key>) -> FacadeResult<Option<V>> {
        self.traps.read(&self.store, &key.into())
    }

    pub fn write(&mut self, key: impl Into<Key>, value: V) -> FacadeResult<()> {
        self.traps.write(&mut self.store, key.into(), value)
    }

    pub fn delete(&mut self, key: impl Into<Key>) -> FacadeResult<()> {
        self.traps.delete(&mut self.store, &key.into())
    }

    pub fn contains(&self, key: impl Into<Key>) -> FacadeResult<bool> {
        self.traps.contains(&self.store, &key.into())
    }

    /// Keys as reported by the trap set; insertion order by default.
    pub fn enumerate(&self) -> FacadeResult<Vec<Key>> {
        self.traps.enumerate(&self.store)
    }

    /// Direct, unmediated view of the backing store.
    pub fn store(&self) -> &BackingStore<V> {
        &self.store
    }

    pub fn traps(&self) -> &T {
        &self.traps
    }

    pub fn traps_mut(&mut self) -> &mut T {
        &mut self.traps
    }

    pub fn into_parts(self) -> (BackingStore<V>, T) {
        (self.store, self.traps)
    }
}

impl<V: Clone> Facade<V, PassThrough> {
    /// A facade that intercepts nothing.
    pub fn pass_through(store: BackingStore<V>) -> Self {
        Self {
            store,
            traps: PassThrough,
        }
    }
}
