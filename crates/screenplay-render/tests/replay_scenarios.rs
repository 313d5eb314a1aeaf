//! End-to-end scenarios: records in, primitive calls out.

use screenplay_core::config::StoreConfig;
use screenplay_render::{
    Axis, Command, CommandStore, DecodeError, HeadlessSurface, ReplayError, StoreError,
    SurfaceCall, replay,
};

fn store_with(records: &[&str]) -> CommandStore {
    let mut store = CommandStore::new(StoreConfig::default());
    for r in records {
        store.append(r).unwrap();
    }
    store
}

fn draws(calls: &[SurfaceCall]) -> Vec<SurfaceCall> {
    calls.iter().filter(|c| c.is_draw()).cloned().collect()
}

#[test]
fn print_text_record_prints_once() {
    let store = store_with(&["011|hello"]);
    let mut surface = HeadlessSurface::new(24, 80);
    replay(&store, &mut surface).unwrap();
    assert_eq!(draws(surface.calls()), vec![SurfaceCall::Print("hello".into())]);
    assert_eq!(store.size().unwrap(), 1);
    assert_eq!(store.read_at(0).unwrap(), "011|hello");
}

#[test]
fn border_record_draws_border_only() {
    let store = store_with(&["020"]);
    let mut surface = HeadlessSurface::new(24, 80);
    replay(&store, &mut surface).unwrap();
    assert_eq!(draws(surface.calls()), vec![SurfaceCall::Border]);
}

#[test]
fn relative_move_past_right_edge_stops_the_pass() {
    let store = store_with(&["011|before", "003|0|200", "011|after", "020"]);
    let mut surface = HeadlessSurface::new(24, 80);
    let err = replay(&store, &mut surface).unwrap_err();
    assert!(matches!(
        err,
        ReplayError::OutOfBounds {
            index: 1,
            axis: Axis::Col,
            ..
        }
    ));
    assert_eq!(
        surface.calls(),
        &[SurfaceCall::Clear, SurfaceCall::Print("before".into())]
    );
    assert_eq!(surface.refresh_count(), 0);
}

#[test]
fn pop_on_fresh_store_is_empty_error() {
    let mut store = CommandStore::default();
    assert_eq!(store.pop_last(), Err(StoreError::EmptyStore));
}

#[test]
fn erase_middle_then_read_neighbors() {
    let mut store = store_with(&["011|zero", "011|one", "011|two"]);
    store.erase_at(1).unwrap();
    assert_eq!(store.read_at(0).unwrap(), "011|zero");
    assert_eq!(store.read_at(1).unwrap(), "011|two");
    assert_eq!(store.size().unwrap(), 2);
}

#[test]
fn refresh_happens_once_per_pass() {
    let store = store_with(&["020", "002|1|1", "011|a", "012|7", "013|0.5"]);
    let mut surface = HeadlessSurface::new(5, 20);
    replay(&store, &mut surface).unwrap();
    replay(&store, &mut surface).unwrap();
    assert_eq!(surface.refresh_count(), 2);
    assert_eq!(surface.row_text(1), "│a70.500000        │");
}

#[test]
fn print_text_takes_first_token() {
    let store = store_with(&["011|a|b||c", "011||x", "011"]);
    let mut surface = HeadlessSurface::new(1, 10);
    let stats = replay(&store, &mut surface).unwrap();
    assert_eq!(stats.executed, 3);
    assert_eq!(surface.row_text(0), "ax        ");
}

#[test]
fn malformed_record_reports_index() {
    let store = store_with(&["011|ok", "1x"]);
    let mut surface = HeadlessSurface::new(1, 10);
    let err = replay(&store, &mut surface).unwrap_err();
    assert!(matches!(
        err,
        ReplayError::Decode {
            index: 1,
            error: DecodeError::MalformedRecord
        }
    ));
    assert_eq!(err.record_index(), Some(1));
}

#[test]
fn commands_built_by_value_replay_like_text() {
    let mut built = CommandStore::default();
    for command in [
        Command::Border,
        Command::Move { row: 2, col: 3 },
        Command::PrintText("typed"),
        Command::MoveRelative { dy: 1, dx: -3 },
        Command::HLine { ch: '=', len: 5 },
    ] {
        built.push_command(&command).unwrap();
    }
    let texts = store_with(&["020", "002|2|3", "011|typed", "003|1|-3", "022|=|5"]);

    let mut a = HeadlessSurface::new(6, 12);
    let mut b = HeadlessSurface::new(6, 12);
    replay(&built, &mut a).unwrap();
    replay(&texts, &mut b).unwrap();
    assert_eq!(a.calls(), b.calls());
    assert_eq!(a.text(), b.text());
}

#[test]
fn surface_resize_between_passes_changes_bounds() {
    let store = store_with(&["003|0|50"]);
    let mut surface = HeadlessSurface::new(10, 80);
    replay(&store, &mut surface).unwrap();
    surface.resize(10, 40);
    assert!(matches!(
        replay(&store, &mut surface),
        Err(ReplayError::OutOfBounds { .. })
    ));
}

#[test]
fn replay_after_many_appends_and_growth() {
    let mut store = CommandStore::new(StoreConfig::new(16));
    for i in 0..200 {
        store.push_command(&Command::PrintInt(i)).unwrap();
    }
    let mut surface = HeadlessSurface::new(40, 80);
    let stats = replay(&store, &mut surface).unwrap();
    assert_eq!(stats.executed, 200);
    assert!(surface.row_text(0).starts_with("0123456789101112"));
}
