#![no_main]

use libfuzzer_sys::fuzz_target;
use screenplay_backend::DrawSurface;
use screenplay_core::config::StoreConfig;
use screenplay_render::{Command, CommandStore, HeadlessSurface, ReplayPolicy, Replayer};

fuzz_target!(|data: &[u8]| {
    // First two bytes pick the surface size (1..40 x 1..80).
    if data.len() < 2 {
        return;
    }
    let rows = u16::from(data[0] % 40) + 1;
    let cols = u16::from(data[1] % 80) + 1;
    let Ok(text) = std::str::from_utf8(&data[2..]) else {
        return;
    };

    // Decoding never panics, and anything that decodes and is encodable
    // survives an encode/decode trip unchanged.
    for line in text.split('\n') {
        if let Ok(command) = Command::parse(line) {
            if command.is_encodable() {
                let encoded = command.to_string();
                let again = Command::parse(&encoded).expect("encoded command must decode");
                assert_eq!(again, command, "re-decode of {encoded:?}");
            }
        }
    }

    let mut store = CommandStore::new(StoreConfig::unlimited());
    for line in text.split('\n') {
        if store.append(line).is_err() {
            return;
        }
    }
    let before: Vec<String> = store.records().map(|r| r.unwrap().to_owned()).collect();

    let mut surface = HeadlessSurface::new(rows, cols);
    let _ = Replayer::new(ReplayPolicy::SkipInvalid).replay(&store, &mut surface);

    // Replay never moves the cursor off the surface or touches the store.
    let (r, c) = surface.cursor();
    assert!(r < rows && c < cols, "cursor ({r}, {c}) outside {rows}x{cols}");
    let after: Vec<String> = store.records().map(|r| r.unwrap().to_owned()).collect();
    assert_eq!(before, after);
});
