#![forbid(unsafe_code)]

//! Three-window demo: fills each window's store and replays once to stdout.
//!
//! Layout: a left pane at full height, and the right half split into a top
//! and a bottom pane. No raw mode, no input; the program draws and exits.

use std::io::{self, Write};
use std::process::ExitCode;

use screenplay::core::logging;
use screenplay::prelude::*;

const LEFT: WindowSpec = WindowSpec::new(1.0, 0.5, 0.0, 0.0);
const TOP_RIGHT: WindowSpec = WindowSpec::new(0.5, 0.5, 0.0, 0.5);
const BOTTOM_RIGHT: WindowSpec = WindowSpec::new(0.5, 0.5, 0.5, 0.5);

fn main() -> ExitCode {
    if let Err(err) = logging::init() {
        eprintln!("{err}");
    }
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("screenplay-demo: {err} ({})", err.recovery());
            ExitCode::FAILURE
        }
    }
}

fn run() -> screenplay::Result<()> {
    let terminal = terminal_extent()?;
    let config = StoreConfig::from_env();
    let mut screen = Screen::new();

    let panes = [
        (LEFT, AnsiColor::Green),
        (TOP_RIGHT, AnsiColor::Cyan),
        (BOTTOM_RIGHT, AnsiColor::Yellow),
    ];
    let mut ids = Vec::with_capacity(panes.len());
    for (spec, color) in panes {
        let surface = AnsiSurface::new(io::stdout(), spec.resolve(terminal)).with_color(color);
        ids.push(screen.add(Window::new(surface, config)));
    }

    fill_left(screen.window_mut(ids[0])?)?;
    fill_top_right(screen.window_mut(ids[1])?)?;
    fill_bottom_right(screen.window_mut(ids[2])?)?;

    // Clear the terminal once; each window then only paints its own area.
    let mut out = io::stdout();
    out.write_all(b"\x1b[2J")?;
    out.flush()?;

    screen.repaint_all()?;

    write!(out, "\x1b[{};1H", terminal.rows)?;
    out.flush()?;
    Ok(())
}

fn fill_left<S: DrawSurface>(w: &mut Window<S>) -> screenplay::Result<()> {
    w.push_command(&Command::Border)?;
    w.push_command(&Command::Move { row: 1, col: 2 })?;
    w.push_command(&Command::PrintText("records"))?;
    w.push_command(&Command::MoveRelative { dy: 1, dx: 0 })?;
    w.push_command(&Command::HLine { ch: '─', len: 7 })?;
    for i in 0..5i64 {
        w.push_command(&Command::Move {
            row: 3 + i as i32,
            col: 2,
        })?;
        w.push_command(&Command::PrintInt(i * i))?;
    }
    Ok(())
}

fn fill_top_right<S: DrawSurface>(w: &mut Window<S>) -> screenplay::Result<()> {
    w.push("020")?;
    w.push("004|50|10")?;
    w.push("011|centered")?;
    w.push("002|1|1")?;
    w.push("013|3.14159")?;
    Ok(())
}

fn fill_bottom_right<S: DrawSurface>(w: &mut Window<S>) -> screenplay::Result<()> {
    w.push_command(&Command::Border)?;
    w.push_command(&Command::MovePercent { py: 20.0, px: 10.0 })?;
    w.push_command(&Command::VLine { ch: '#', len: 3 })?;
    w.push_command(&Command::MoveRelative { dy: 0, dx: 2 })?;
    w.push_command(&Command::PrintText("a"))?;
    w.push_command(&Command::Delimiter)?;
    w.push_command(&Command::PrintText("b"))?;
    w.push("010")?;
    Ok(())
}
