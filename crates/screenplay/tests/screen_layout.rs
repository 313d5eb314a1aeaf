//! Screen-level tests: fractional layout, ANSI output, repaint after resize.

use screenplay::prelude::*;

const LEFT: WindowSpec = WindowSpec::new(1.0, 0.5, 0.0, 0.0);
const TOP_RIGHT: WindowSpec = WindowSpec::new(0.5, 0.5, 0.0, 0.5);
const BOTTOM_RIGHT: WindowSpec = WindowSpec::new(0.5, 0.5, 0.5, 0.5);

fn ansi_screen(terminal: Extent) -> (Screen<AnsiSurface<Vec<u8>>>, Vec<WindowId>) {
    let mut screen = Screen::new();
    let ids = [LEFT, TOP_RIGHT, BOTTOM_RIGHT]
        .into_iter()
        .map(|spec| {
            let surface = AnsiSurface::new(Vec::new(), spec.resolve(terminal));
            screen.add(Window::new(surface, StoreConfig::default()))
        })
        .collect();
    (screen, ids)
}

#[test]
fn three_pane_layout_tiles_the_terminal() {
    let terminal = Extent::new(24, 80);
    assert_eq!(LEFT.resolve(terminal), Rect::new(0, 0, 40, 24));
    assert_eq!(TOP_RIGHT.resolve(terminal), Rect::new(40, 0, 40, 12));
    assert_eq!(BOTTOM_RIGHT.resolve(terminal), Rect::new(40, 12, 40, 12));
}

#[test]
fn each_window_writes_at_its_own_origin() {
    let (mut screen, ids) = ansi_screen(Extent::new(24, 80));
    for &id in &ids {
        screen.push(id, "011|x").unwrap();
    }
    screen.repaint_all().unwrap();

    let out = |id| String::from_utf8(screen.get(id).unwrap().surface().get_ref().clone()).unwrap();
    assert!(out(ids[0]).contains("\x1b[1;1Hx"));
    assert!(out(ids[1]).contains("\x1b[1;41Hx"));
    assert!(out(ids[2]).contains("\x1b[13;41Hx"));
}

#[test]
fn resize_then_repaint_uses_new_bounds() {
    let (mut screen, ids) = ansi_screen(Extent::new(24, 80));
    let right = ids[1];
    screen.push(right, "003|0|30").unwrap();
    screen.repaint(right).unwrap();

    let smaller = Extent::new(24, 40);
    screen
        .window_mut(right)
        .unwrap()
        .surface_mut()
        .set_area(TOP_RIGHT.resolve(smaller));
    let err = screen.repaint(right).unwrap_err();
    assert_eq!(err.recovery(), RecoveryAction::SkipRecord);
}

#[test]
fn headless_and_ansi_agree_on_cursor() {
    let records = ["020", "004|50|50", "011|mid", "003|1|-3", "012|42"];
    let mut headless = Window::new(HeadlessSurface::new(10, 20), StoreConfig::default());
    let mut ansi = Window::new(
        AnsiSurface::new(Vec::new(), Rect::new(0, 0, 20, 10)),
        StoreConfig::default(),
    );
    for r in records {
        headless.push(r).unwrap();
        ansi.push(r).unwrap();
    }
    headless.repaint().unwrap();
    ansi.repaint().unwrap();
    assert_eq!(headless.surface().cursor(), ansi.surface().cursor());
    assert_eq!(headless.surface().cursor(), (6, 12));
}
