//! Property-based invariant tests for the record store and replay.
//!
//! These tests verify that:
//!
//! 1. `size()` tracks appends and pops exactly.
//! 2. Any appended payload reads back byte-identical at its index.
//! 3. Arbitrary append/pop/erase/clear sequences agree with a `Vec` model.
//! 4. Growth past the floor capacity never disturbs earlier records.
//! 5. Replaying a store twice issues identical calls and leaves it unchanged.

use proptest::prelude::*;
use screenplay_core::config::StoreConfig;
use screenplay_render::{CommandStore, HeadlessSurface, ReplayPolicy, Replayer};

// ── Helpers ─────────────────────────────────────────────────────────────

fn payload() -> impl Strategy<Value = String> {
    "\\PC{0,24}"
}

fn payloads(max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(payload(), 0..max)
}

#[derive(Debug, Clone)]
enum Op {
    Append(String),
    Pop,
    Erase(usize),
    Read(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => payload().prop_map(Op::Append),
        2 => Just(Op::Pop),
        2 => any::<usize>().prop_map(Op::Erase),
        2 => any::<usize>().prop_map(Op::Read),
        1 => Just(Op::Clear),
    ]
}

fn small_store() -> CommandStore {
    CommandStore::new(StoreConfig::unlimited().with_initial_capacity(16))
}

fn contents(store: &CommandStore) -> Vec<String> {
    store.records().map(|r| r.unwrap().to_owned()).collect()
}

fn draw_record() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("020".to_string()),
        Just("010".to_string()),
        (0i32..12, 0i32..30).prop_map(|(y, x)| format!("002|{y}|{x}")),
        (-3i32..3, -3i32..3).prop_map(|(y, x)| format!("003|{y}|{x}")),
        (0.0f64..=100.0, 0.0f64..=100.0).prop_map(|(y, x)| format!("004|{y}|{x}")),
        "[a-z ]{0,12}".prop_map(|t| format!("011|{t}")),
        any::<i64>().prop_map(|n| format!("012|{n}")),
        (0u16..20).prop_map(|n| format!("022|-|{n}")),
        (0u16..20).prop_map(|n| format!("021|#|{n}")),
        "[0-9|]{0,6}",
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Append / size
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn size_tracks_appends_and_pop(records in payloads(40)) {
        let mut store = small_store();
        for r in &records {
            store.append(r).unwrap();
        }
        prop_assert_eq!(store.size().unwrap(), records.len());
        if let Some(last) = records.last() {
            prop_assert_eq!(&store.pop_last().unwrap(), last);
            prop_assert_eq!(store.size().unwrap(), records.len() - 1);
        }
    }

// ═════════════════════════════════════════════════════════════════════════
// 2. Round trip
// ═════════════════════════════════════════════════════════════════════════

    #[test]
    fn append_then_read_back(prefix in payloads(20), record in payload()) {
        let mut store = small_store();
        for r in &prefix {
            store.append(r).unwrap();
        }
        store.append(&record).unwrap();
        prop_assert_eq!(store.read_at(prefix.len()).unwrap(), record.as_str());
    }

// ═════════════════════════════════════════════════════════════════════════
// 3. Model agreement
// ═════════════════════════════════════════════════════════════════════════

    #[test]
    fn operations_agree_with_vec_model(ops in proptest::collection::vec(op(), 0..80)) {
        let mut store = small_store();
        let mut model: Vec<String> = Vec::new();
        for op in ops {
            match op {
                Op::Append(p) => {
                    store.append(&p).unwrap();
                    model.push(p);
                }
                Op::Pop => {
                    prop_assert_eq!(store.pop_last().ok(), model.pop());
                }
                Op::Erase(i) => {
                    if model.is_empty() {
                        prop_assert!(store.erase_at(i).is_err());
                    } else {
                        let i = i % model.len();
                        store.erase_at(i).unwrap();
                        model.remove(i);
                    }
                }
                Op::Read(i) => {
                    if model.is_empty() {
                        prop_assert!(store.read_at(i).is_err());
                    } else {
                        let i = i % model.len();
                        prop_assert_eq!(store.read_at(i).unwrap(), model[i].as_str());
                        if i + 1 < model.len() {
                            prop_assert_eq!(store.read_next().unwrap(), model[i + 1].as_str());
                        }
                    }
                }
                Op::Clear => {
                    store.clear();
                    model.clear();
                    prop_assert_eq!(store.capacity(), 16);
                }
            }
            prop_assert_eq!(store.size().unwrap(), model.len());
        }
        prop_assert_eq!(contents(&store), model);
    }

    #[test]
    fn erase_removes_exactly_one_position(records in payloads(20), k in any::<usize>()) {
        prop_assume!(!records.is_empty());
        let k = k % records.len();
        let mut store = small_store();
        for r in &records {
            store.append(r).unwrap();
        }
        store.erase_at(k).unwrap();
        let mut expected = records.clone();
        expected.remove(k);
        prop_assert_eq!(store.size().unwrap(), records.len() - 1);
        prop_assert_eq!(contents(&store), expected);
    }

// ═════════════════════════════════════════════════════════════════════════
// 4. Growth
// ═════════════════════════════════════════════════════════════════════════

    #[test]
    fn growth_preserves_prior_records(records in proptest::collection::vec("[ -~]{8,64}", 1..60)) {
        let mut store = small_store();
        for (i, r) in records.iter().enumerate() {
            let before = store.capacity();
            store.append(r).unwrap();
            if store.capacity() != before {
                prop_assert_eq!(contents(&store), records[..=i].to_vec());
            }
        }
        prop_assert!(store.capacity() >= 16);
        prop_assert_eq!(contents(&store), records);
    }

// ═════════════════════════════════════════════════════════════════════════
// 5. Replay idempotence
// ═════════════════════════════════════════════════════════════════════════

    #[test]
    fn replay_is_idempotent(records in proptest::collection::vec(draw_record(), 0..30)) {
        let mut store = small_store();
        for r in &records {
            store.append(r).unwrap();
        }
        let replayer = Replayer::new(ReplayPolicy::SkipInvalid);
        let mut surface = HeadlessSurface::new(12, 30);

        let first = replayer.replay(&store, &mut surface);
        let first_calls = surface.take_calls();
        let first_text = surface.text();
        let second = replayer.replay(&store, &mut surface);
        let second_calls = surface.take_calls();

        prop_assert_eq!(first.is_ok(), second.is_ok());
        if let (Ok(a), Ok(b)) = (&first, &second) {
            prop_assert_eq!(a, b);
        }
        prop_assert_eq!(first_calls, second_calls);
        prop_assert_eq!(first_text, surface.text());
        prop_assert_eq!(contents(&store), records);
    }
}
