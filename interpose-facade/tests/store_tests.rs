use interpose_facade::{BackingStore, Key, OpaqueToken};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn names(store: &BackingStore<i32>) -> Vec<String> {
    store.keys().map(ToString::to_string).collect()
}

// ── Basics ───────────────────────────────────────────────────────

#[test]
fn set_returns_previous_value() {
    let mut store = BackingStore::new();
    assert_eq!(store.set("a", 1), None);
    assert_eq!(store.set("a", 2), Some(1));
    assert_eq!(store.get(&Key::from("a")), Some(&2));
    assert_eq!(store.len(), 1);
}

#[test]
fn remove_then_reinsert_moves_key_to_the_end() {
    let mut store = BackingStore::new();
    store.set("a", 1);
    store.set("b", 2);
    store.set("c", 3);
    assert_eq!(store.remove(&Key::from("a")), Some(1));
    store.set("a", 4);

    assert_eq!(names(&store), vec!["b", "c", "a"]);
    assert_eq!(store.values().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
}

#[test]
fn removing_absent_key_is_a_noop() {
    let mut store: BackingStore<i32> = BackingStore::new();
    assert_eq!(store.remove(&Key::from("ghost")), None);
    assert!(store.is_empty());
}

#[test]
fn get_mut_updates_in_place() {
    let mut store = BackingStore::new();
    store.set("n", 1);
    if let Some(n) = store.get_mut(&Key::from("n")) {
        *n += 10;
    }
    assert_eq!(store.get(&Key::from("n")), Some(&11));
}

#[test]
fn token_and_name_keys_coexist() {
    let token = OpaqueToken::labeled("id");
    let mut store = BackingStore::new();
    store.set("id", 1);
    store.set(&token, 2);

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&Key::from("id")), Some(&1));
    assert_eq!(store.get(&Key::from(&token)), Some(&2));
}

#[test]
fn clear_empties_the_store() {
    let mut store: BackingStore<i32> = [("a", 1), ("b", 2)].into_iter().collect();
    store.extend([("c", 3)]);
    assert_eq!(store.len(), 3);
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.iter().count(), 0);
}

// ── Properties ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Set(u8, i32),
    Remove(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12, any::<i32>()).prop_map(|(k, v)| Op::Set(k, v)),
        (0u8..12).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn matches_a_reference_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut store = BackingStore::new();
        let mut model: Vec<(String, i32)> = Vec::new();

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    let name = format!("k{k}");
                    match model.iter_mut().find(|(n, _)| *n == name) {
                        Some(entry) => entry.1 = v,
                        None => model.push((name.clone(), v)),
                    }
                    store.set(name, v);
                }
                Op::Remove(k) => {
                    let name = format!("k{k}");
                    model.retain(|(n, _)| *n != name);
                    store.remove(&Key::from(name));
                }
            }
        }

        let actual: Vec<(String, i32)> = store.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        prop_assert_eq!(actual, model);
    }
}
