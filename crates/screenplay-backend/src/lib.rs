#![forbid(unsafe_code)]
#![doc = "Drawing-surface boundary for Screenplay."]
#![doc = ""]
#![doc = "This crate defines the sink that replay drives: a text-cell window that can be"]
#![doc = "cleared, written to at a cursor, boxed, and flushed. Implementations live in"]
#![doc = "`screenplay-render` (headless, for tests) and `screenplay-tty` (ANSI terminal)."]
#![doc = ""]
#![doc = "The replay layer never creates, resizes, or destroys a surface; it only issues"]
#![doc = "primitive calls against one it was handed."]

use std::fmt;
use std::io;

pub use screenplay_core::geometry::Extent;

/// Failure reported by a drawing surface.
#[derive(Debug)]
pub enum SurfaceError {
    /// I/O failure while flushing output.
    Io(io::Error),
    /// A cursor move targeted a cell outside the surface.
    CursorOutOfRange {
        /// Requested row.
        row: u16,
        /// Requested column.
        col: u16,
        /// Surface size at the time of the call.
        extent: Extent,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "surface I/O: {err}"),
            Self::CursorOutOfRange { row, col, extent } => write!(
                f,
                "cursor ({row}, {col}) outside {}x{} surface",
                extent.rows, extent.cols
            ),
        }
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::CursorOutOfRange { .. } => None,
        }
    }
}

impl From<io::Error> for SurfaceError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result type for surface calls.
pub type SurfaceResult<T = ()> = Result<T, SurfaceError>;

/// A text-cell drawing surface.
///
/// Coordinates are `(row, col)`, 0-indexed from the surface's own top-left
/// corner. The semantics follow curses windows:
///
/// - [`print`](Self::print) writes at the cursor and advances it, wrapping at
///   the right edge;
/// - [`draw_border`](Self::draw_border), [`vline`](Self::vline) and
///   [`hline`](Self::hline) leave the cursor where it was;
/// - nothing reaches the screen until [`refresh`](Self::refresh).
pub trait DrawSurface {
    /// Current size. May change between replays (terminal resize).
    fn extent(&self) -> Extent;

    /// Current cursor position as `(row, col)`.
    fn cursor(&self) -> (u16, u16);

    /// Blank every cell and home the cursor.
    fn clear(&mut self) -> SurfaceResult;

    /// Present everything drawn since the last refresh.
    fn refresh(&mut self) -> SurfaceResult;

    /// Move the cursor to an absolute cell.
    fn move_to(&mut self, row: u16, col: u16) -> SurfaceResult;

    /// Print text at the cursor.
    fn print(&mut self, text: &str) -> SurfaceResult;

    /// Draw a border around the whole surface.
    fn draw_border(&mut self) -> SurfaceResult;

    /// Draw `len` cells of `ch` downward from the cursor, clipped at the edge.
    fn vline(&mut self, ch: char, len: u16) -> SurfaceResult;

    /// Draw `len` cells of `ch` rightward from the cursor, clipped at the edge.
    fn hline(&mut self, ch: char, len: u16) -> SurfaceResult;
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn extent(&self) -> Extent {
        (**self).extent()
    }

    fn cursor(&self) -> (u16, u16) {
        (**self).cursor()
    }

    fn clear(&mut self) -> SurfaceResult {
        (**self).clear()
    }

    fn refresh(&mut self) -> SurfaceResult {
        (**self).refresh()
    }

    fn move_to(&mut self, row: u16, col: u16) -> SurfaceResult {
        (**self).move_to(row, col)
    }

    fn print(&mut self, text: &str) -> SurfaceResult {
        (**self).print(text)
    }

    fn draw_border(&mut self) -> SurfaceResult {
        (**self).draw_border()
    }

    fn vline(&mut self, ch: char, len: u16) -> SurfaceResult {
        (**self).vline(ch, len)
    }

    fn hline(&mut self, ch: char, len: u16) -> SurfaceResult {
        (**self).hline(ch, len)
    }
}

impl<S: DrawSurface + ?Sized> DrawSurface for Box<S> {
    fn extent(&self) -> Extent {
        (**self).extent()
    }

    fn cursor(&self) -> (u16, u16) {
        (**self).cursor()
    }

    fn clear(&mut self) -> SurfaceResult {
        (**self).clear()
    }

    fn refresh(&mut self) -> SurfaceResult {
        (**self).refresh()
    }

    fn move_to(&mut self, row: u16, col: u16) -> SurfaceResult {
        (**self).move_to(row, col)
    }

    fn print(&mut self, text: &str) -> SurfaceResult {
        (**self).print(text)
    }

    fn draw_border(&mut self) -> SurfaceResult {
        (**self).draw_border()
    }

    fn vline(&mut self, ch: char, len: u16) -> SurfaceResult {
        (**self).vline(ch, len)
    }

    fn hline(&mut self, ch: char, len: u16) -> SurfaceResult {
        (**self).hline(ch, len)
    }
}
