#![forbid(unsafe_code)]
#![doc = "ANSI terminal drawing surface for Screenplay."]
#![doc = ""]
#![doc = "[`AnsiSurface`] implements `DrawSurface` for one window: a rectangle of the"]
#![doc = "terminal addressed with CUP sequences. Drawing is buffered and written to the"]
#![doc = "underlying writer only on `refresh`, so a replay pass reaches the terminal in"]
#![doc = "one write."]
#![doc = ""]
#![doc = "The crate also answers the two questions the upstream loop asks the terminal:"]
#![doc = "how big it is ([`terminal_extent`]) and whether it has been resized"]
#![doc = "([`ResizeFlag`], Unix only)."]

use std::io::{self, Write};

use screenplay_backend::{DrawSurface, Extent, SurfaceError, SurfaceResult};
use screenplay_core::geometry::Rect;
use unicode_width::UnicodeWidthChar;

#[cfg(unix)]
mod resize;

#[cfg(unix)]
pub use resize::ResizeFlag;

const BORDER_H: char = '─';
const BORDER_V: char = '│';
const CORNERS: [char; 4] = ['┌', '┐', '└', '┘'];

// ── Color ────────────────────────────────────────────────────────────────

/// One of the eight basic ANSI foreground colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl AnsiColor {
    /// SGR foreground parameter (30-37).
    #[must_use]
    pub const fn sgr(self) -> u8 {
        30 + self as u8
    }

    /// Parse a color name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.trim().to_ascii_lowercase().as_str() {
            "black" => Self::Black,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            _ => return None,
        };
        Some(color)
    }
}

// ── Surface ──────────────────────────────────────────────────────────────

/// A terminal window drawn with ANSI escape sequences.
///
/// Coordinates passed to [`DrawSurface`] methods are relative to the
/// window's own top-left corner; the surface translates them into absolute
/// terminal positions.
#[derive(Debug)]
pub struct AnsiSurface<W: Write> {
    writer: W,
    area: Rect,
    cursor: (u16, u16),
    fg: Option<AnsiColor>,
    pending: Vec<u8>,
}

impl<W: Write> AnsiSurface<W> {
    /// Create a surface covering `area` of the terminal.
    pub fn new(writer: W, area: Rect) -> Self {
        Self {
            writer,
            area,
            cursor: (0, 0),
            fg: None,
            pending: Vec::with_capacity(4096),
        }
    }

    /// Set the foreground color used for everything drawn from now on.
    #[must_use]
    pub fn with_color(mut self, fg: AnsiColor) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Get the foreground color.
    pub fn color(&self) -> Option<AnsiColor> {
        self.fg
    }

    /// Get the window's terminal rectangle.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Move the window to a new rectangle (after a terminal resize).
    ///
    /// Undrawn output is discarded; the next replay repaints everything.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        self.pending.clear();
        self.cursor = (
            self.cursor.0.min(area.height.saturating_sub(1)),
            self.cursor.1.min(area.width.saturating_sub(1)),
        );
    }

    /// Bytes drawn but not yet written.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Get the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume the surface, returning the writer. Pending output is dropped.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn cup(&mut self, row: u16, col: u16) {
        let y = u32::from(self.area.y) + u32::from(row) + 1;
        let x = u32::from(self.area.x) + u32::from(col) + 1;
        // Writes into a Vec cannot fail.
        let _ = write!(self.pending, "\x1b[{y};{x}H");
    }

    fn begin_color(&mut self) {
        if let Some(fg) = self.fg {
            let _ = write!(self.pending, "\x1b[{}m", fg.sgr());
        }
    }

    fn end_color(&mut self) {
        if self.fg.is_some() {
            self.pending.extend_from_slice(b"\x1b[39m");
        }
    }

    fn put_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.pending
            .extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }

    /// Draw one glyph at a window cell without touching the logical cursor.
    fn put_at(&mut self, row: u16, col: u16, ch: char) {
        if self.area.extent().contains(row, col) {
            self.cup(row, col);
            self.put_char(ch);
        }
    }
}

/// Replace control characters so printed text cannot smuggle escape
/// sequences into the terminal.
fn printable(ch: char) -> Option<char> {
    if ch.is_control() { None } else { Some(ch) }
}

impl<W: Write> DrawSurface for AnsiSurface<W> {
    fn extent(&self) -> Extent {
        self.area.extent()
    }

    fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    fn clear(&mut self) -> SurfaceResult {
        let blank = " ".repeat(usize::from(self.area.width));
        for row in 0..self.area.height {
            self.cup(row, 0);
            self.pending.extend_from_slice(blank.as_bytes());
        }
        self.cursor = (0, 0);
        Ok(())
    }

    fn refresh(&mut self) -> SurfaceResult {
        if !self.pending.is_empty() {
            let (row, col) = self.cursor;
            self.cup(row, col);
            self.writer.write_all(&self.pending)?;
            self.pending.clear();
        }
        self.writer.flush()?;
        Ok(())
    }

    fn move_to(&mut self, row: u16, col: u16) -> SurfaceResult {
        let extent = self.extent();
        if !extent.contains(row, col) {
            return Err(SurfaceError::CursorOutOfRange { row, col, extent });
        }
        self.cursor = (row, col);
        Ok(())
    }

    fn print(&mut self, text: &str) -> SurfaceResult {
        let Extent { rows, cols } = self.extent();
        if rows == 0 || cols == 0 {
            return Ok(());
        }
        let (mut row, mut col) = self.cursor;
        self.begin_color();
        self.cup(row, col);
        for ch in text.chars().filter_map(printable) {
            let width = match ch.width() {
                Some(w) if w > 0 && w as u16 <= cols => w as u16,
                _ => continue,
            };
            if col + width > cols {
                if row + 1 >= rows {
                    break;
                }
                row += 1;
                col = 0;
                self.cup(row, col);
            }
            self.put_char(ch);
            col += width;
            if col >= cols {
                if row + 1 >= rows {
                    col = cols - 1;
                    break;
                }
                row += 1;
                col = 0;
                self.cup(row, col);
            }
        }
        self.end_color();
        self.cursor = (row, col);
        Ok(())
    }

    fn draw_border(&mut self) -> SurfaceResult {
        let Extent { rows, cols } = self.extent();
        if rows == 0 || cols == 0 {
            return Ok(());
        }
        let (bottom, right) = (rows - 1, cols - 1);
        self.begin_color();
        for col in 0..cols {
            self.put_at(0, col, BORDER_H);
            self.put_at(bottom, col, BORDER_H);
        }
        for row in 0..rows {
            self.put_at(row, 0, BORDER_V);
            self.put_at(row, right, BORDER_V);
        }
        let [tl, tr, bl, br] = CORNERS;
        self.put_at(0, 0, tl);
        self.put_at(0, right, tr);
        self.put_at(bottom, 0, bl);
        self.put_at(bottom, right, br);
        self.end_color();
        Ok(())
    }

    fn vline(&mut self, ch: char, len: u16) -> SurfaceResult {
        let Some(ch) = printable(ch) else {
            return Ok(());
        };
        let (row, col) = self.cursor;
        let end = row.saturating_add(len).min(self.area.height);
        self.begin_color();
        for r in row..end {
            self.put_at(r, col, ch);
        }
        self.end_color();
        Ok(())
    }

    fn hline(&mut self, ch: char, len: u16) -> SurfaceResult {
        let Some(ch) = printable(ch) else {
            return Ok(());
        };
        let (row, col) = self.cursor;
        let end = col.saturating_add(len).min(self.area.width);
        if col < end && row < self.area.height {
            self.begin_color();
            self.cup(row, col);
            for _ in col..end {
                self.put_char(ch);
            }
            self.end_color();
        }
        Ok(())
    }
}

// ── Terminal size ────────────────────────────────────────────────────────

/// Size used when nothing better is known.
pub const FALLBACK_EXTENT: Extent = Extent::new(24, 80);

/// Current size of the controlling terminal.
///
/// Asks the terminal on stdout first, then `LINES`/`COLUMNS`, then falls
/// back to [`FALLBACK_EXTENT`]. A 1x1 or 0x0 answer counts as no answer.
pub fn terminal_extent() -> io::Result<Extent> {
    #[cfg(unix)]
    {
        match rustix::termios::tcgetwinsize(io::stdout()) {
            Ok(ws) if ws.ws_row > 1 && ws.ws_col > 1 => {
                return Ok(Extent::new(ws.ws_row, ws.ws_col));
            }
            Ok(_) => {}
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_err, "terminal size query failed");
            }
        }
    }
    Ok(extent_from_env(|key| std::env::var(key).ok()).unwrap_or(FALLBACK_EXTENT))
}

fn extent_from_env<F>(lookup: F) -> Option<Extent>
where
    F: Fn(&str) -> Option<String>,
{
    let rows = lookup("LINES")?.trim().parse::<u16>().ok()?;
    let cols = lookup("COLUMNS")?.trim().parse::<u16>().ok()?;
    (rows > 1 && cols > 1).then_some(Extent::new(rows, cols))
}
