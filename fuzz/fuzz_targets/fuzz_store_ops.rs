#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use screenplay_core::config::StoreConfig;
use screenplay_render::CommandStore;

#[derive(Debug, Arbitrary)]
enum Op {
    Append(String),
    Pop,
    Erase(u16),
    Read(u16),
    Next,
    Clear,
}

#[derive(Debug, Arbitrary)]
struct Input {
    floor: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let config = StoreConfig::unlimited().with_initial_capacity(usize::from(input.floor));
    let mut store = CommandStore::new(config);
    let mut model: Vec<String> = Vec::new();
    let mut last_read: Option<usize> = None;

    for op in input.ops {
        match op {
            Op::Append(payload) => {
                if store.append(&payload).is_ok() {
                    model.push(payload);
                } else {
                    assert!(payload.contains('\0'), "rejected {payload:?}");
                }
            }
            Op::Pop => {
                assert_eq!(store.pop_last().ok(), model.pop());
                if last_read.is_some_and(|i| i >= model.len()) {
                    last_read = None;
                }
            }
            Op::Erase(i) => {
                let i = usize::from(i);
                if i < model.len() {
                    store.erase_at(i).expect("in-range erase");
                    model.remove(i);
                    last_read = None;
                } else {
                    assert!(store.erase_at(i).is_err());
                }
            }
            Op::Read(i) => {
                let i = usize::from(i);
                match model.get(i) {
                    Some(expected) => {
                        assert_eq!(store.read_at(i).expect("in-range read"), expected.as_str());
                        last_read = Some(i);
                    }
                    None => assert!(store.read_at(i).is_err()),
                }
            }
            Op::Next => match last_read {
                Some(i) if i + 1 < model.len() => {
                    assert_eq!(store.read_next().expect("next read"), model[i + 1]);
                    last_read = Some(i + 1);
                }
                _ => assert!(store.read_next().is_err()),
            },
            Op::Clear => {
                store.clear();
                model.clear();
                last_read = None;
            }
        }
        assert_eq!(store.len(), model.len());
        assert!(store.capacity() >= store.config().initial_capacity);
    }

    let all: Vec<&str> = store.records().map(|r| r.expect("record")).collect();
    assert_eq!(all, model);
});
