//! Interceptable key-value facade.
//!
//! A [`Facade`] wraps a [`BackingStore`] and a [`TrapSet`] and routes the five
//! property operations (read, write, delete, contains, enumerate) through
//! the trap set. Trap sets override only what they need; the rest passes
//! through to the store.
//!
//! - [`TrapSet`] — the interception trait, with pass-through defaults
//! - [`Traps`] — a trap set assembled from closures
//! - [`AuditingPolicy`] — records writes and serves them under a virtual key
//! - [`ConfiguredPolicy`] — hidden / read-only / protected key rules from TOML
//! - [`SharedFacade`] — a lock-protected handle for multi-threaded callers
//! - [`TrapObserver`] — injectable sink for trap diagnostics
//!
//! ```
//! use interpose_facade::{AuditingPolicy, BackingStore, Facade};
//! use serde_json::json;
//!
//! let mut person = Facade::create(BackingStore::new(), AuditingPolicy::new()).unwrap();
//! person.write("firstName", json!("Dave")).unwrap();
//! person.write("lastName", json!("Fancher")).unwrap();
//!
//! assert_eq!(person.traps().history().len(), 2);
//! assert!(person.delete("history").unwrap_err().is_protected_key());
//! ```

mod audit;
mod error;
mod facade;
mod observer;
mod operation;
mod policy;
mod shared;
mod store;
mod trap;

pub use audit::{AuditLogEntry, AuditingPolicy, DEFAULT_HISTORY_KEY};
pub use error::{FacadeError, FacadeResult};
pub use facade::Facade;
pub use observer::{Outcome, RecordingObserver, TracingObserver, TrapEvent, TrapObserver};
pub use operation::Operation;
pub use policy::{AuditConfig, ConfiguredPolicy, PolicyConfig, ReadOnlyMode};
pub use shared::SharedFacade;
pub use store::BackingStore;
pub use trap::{PassThrough, TrapSet, Traps};

pub use interpose_types::{Key, OpaqueToken};
