//! Shared test helpers for facade tests.

#![allow(dead_code)]

use interpose_facade::{AuditingPolicy, BackingStore, Facade, RecordingObserver};
use serde_json::Value;
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber once per test binary.
/// Honors `RUST_LOG`, e.g. `RUST_LOG=interpose_facade=debug`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// An auditing facade over an empty store, plus a handle on its event stream.
pub fn audited() -> (Facade<Value, AuditingPolicy>, RecordingObserver) {
    init_tracing();
    let observer = RecordingObserver::new();
    let policy = AuditingPolicy::new().with_observer(Arc::new(observer.clone()));
    let facade = Facade::create(BackingStore::new(), policy).unwrap();
    (facade, observer)
}
