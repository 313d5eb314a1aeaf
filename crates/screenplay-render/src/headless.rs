#![forbid(unsafe_code)]

//! In-memory drawing surface.
//!
//! [`HeadlessSurface`] keeps a character grid and a log of every call it
//! receives, so tests can assert both what was drawn and how. Cursor
//! behavior follows curses windows: printing advances and wraps, borders
//! and lines leave the cursor alone, and output past the bottom-right cell
//! is dropped.

use screenplay_backend::{DrawSurface, Extent, SurfaceError, SurfaceResult};
use unicode_width::UnicodeWidthChar;

/// Marks the second cell of a wide character.
const CONTINUATION: char = '\0';

/// One primitive call, as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Clear,
    Refresh,
    MoveTo { row: u16, col: u16 },
    Print(String),
    Border,
    VLine { ch: char, len: u16 },
    HLine { ch: char, len: u16 },
}

impl SurfaceCall {
    /// Whether the call draws or moves, as opposed to clearing or presenting.
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        !matches!(self, Self::Clear | Self::Refresh)
    }
}

/// A [`DrawSurface`] backed by a `Vec<char>` grid.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    extent: Extent,
    cells: Vec<char>,
    cursor: (u16, u16),
    calls: Vec<SurfaceCall>,
    refreshes: usize,
}

impl HeadlessSurface {
    /// Create a blank surface.
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self {
        let extent = Extent::new(rows, cols);
        Self {
            extent,
            cells: vec![' '; extent.area() as usize],
            cursor: (0, 0),
            calls: Vec::new(),
            refreshes: 0,
        }
    }

    /// Change the size, blanking the grid and clamping the cursor.
    pub fn resize(&mut self, rows: u16, cols: u16) {
        self.extent = Extent::new(rows, cols);
        self.cells = vec![' '; self.extent.area() as usize];
        self.cursor = (
            self.cursor.0.min(rows.saturating_sub(1)),
            self.cursor.1.min(cols.saturating_sub(1)),
        );
    }

    /// Calls received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of `refresh` calls so far.
    #[must_use]
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    /// Character at a cell, `None` outside the grid or on the tail of a
    /// wide character.
    #[must_use]
    pub fn cell(&self, row: u16, col: u16) -> Option<char> {
        self.index(row, col)
            .map(|i| self.cells[i])
            .filter(|&c| c != CONTINUATION)
    }

    /// One row as text, wide-character tails omitted.
    #[must_use]
    pub fn row_text(&self, row: u16) -> String {
        if row >= self.extent.rows {
            return String::new();
        }
        let cols = usize::from(self.extent.cols);
        let start = usize::from(row) * cols;
        self.cells[start..start + cols]
            .iter()
            .filter(|&&c| c != CONTINUATION)
            .collect()
    }

    /// Every row joined by newlines.
    #[must_use]
    pub fn text(&self) -> String {
        (0..self.extent.rows)
            .map(|row| self.row_text(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn index(&self, row: u16, col: u16) -> Option<usize> {
        self.extent
            .contains(row, col)
            .then(|| usize::from(row) * usize::from(self.extent.cols) + usize::from(col))
    }

    fn put(&mut self, row: u16, col: u16, ch: char) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = ch;
        }
    }

    /// Write one character at the cursor and advance. Returns false once the
    /// cursor can go no further.
    fn put_advance(&mut self, ch: char) -> bool {
        let (rows, cols) = (self.extent.rows, self.extent.cols);
        if ch == '\n' {
            if self.cursor.0 + 1 >= rows {
                return false;
            }
            self.cursor = (self.cursor.0 + 1, 0);
            return true;
        }
        let width = match ch.width() {
            Some(w) if w > 0 => w as u16,
            _ => return true,
        };
        if width > cols {
            return true;
        }
        let (mut row, mut col) = self.cursor;
        if col + width > cols {
            if row + 1 >= rows {
                return false;
            }
            row += 1;
            col = 0;
        }
        self.put(row, col, ch);
        for extra in 1..width {
            self.put(row, col + extra, CONTINUATION);
        }
        col += width;
        if col >= cols {
            if row + 1 >= rows {
                self.cursor = (row, cols - 1);
                return false;
            }
            row += 1;
            col = 0;
        }
        self.cursor = (row, col);
        true
    }
}

impl DrawSurface for HeadlessSurface {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    fn clear(&mut self) -> SurfaceResult {
        self.calls.push(SurfaceCall::Clear);
        self.cells.fill(' ');
        self.cursor = (0, 0);
        Ok(())
    }

    fn refresh(&mut self) -> SurfaceResult {
        self.calls.push(SurfaceCall::Refresh);
        self.refreshes += 1;
        Ok(())
    }

    fn move_to(&mut self, row: u16, col: u16) -> SurfaceResult {
        self.calls.push(SurfaceCall::MoveTo { row, col });
        if !self.extent.contains(row, col) {
            return Err(SurfaceError::CursorOutOfRange {
                row,
                col,
                extent: self.extent,
            });
        }
        self.cursor = (row, col);
        Ok(())
    }

    fn print(&mut self, text: &str) -> SurfaceResult {
        self.calls.push(SurfaceCall::Print(text.to_owned()));
        if self.extent.is_empty() {
            return Ok(());
        }
        for ch in text.chars() {
            if !self.put_advance(ch) {
                break;
            }
        }
        Ok(())
    }

    fn draw_border(&mut self) -> SurfaceResult {
        self.calls.push(SurfaceCall::Border);
        let (rows, cols) = (self.extent.rows, self.extent.cols);
        if rows == 0 || cols == 0 {
            return Ok(());
        }
        let (bottom, right) = (rows - 1, cols - 1);
        for col in 0..cols {
            self.put(0, col, '─');
            self.put(bottom, col, '─');
        }
        for row in 0..rows {
            self.put(row, 0, '│');
            self.put(row, right, '│');
        }
        self.put(0, 0, '┌');
        self.put(0, right, '┐');
        self.put(bottom, 0, '└');
        self.put(bottom, right, '┘');
        Ok(())
    }

    fn vline(&mut self, ch: char, len: u16) -> SurfaceResult {
        self.calls.push(SurfaceCall::VLine { ch, len });
        let (row, col) = self.cursor;
        let end = row.saturating_add(len).min(self.extent.rows);
        for r in row..end {
            self.put(r, col, ch);
        }
        Ok(())
    }

    fn hline(&mut self, ch: char, len: u16) -> SurfaceResult {
        self.calls.push(SurfaceCall::HLine { ch, len });
        let (row, col) = self.cursor;
        let end = col.saturating_add(len).min(self.extent.cols);
        for c in col..end {
            self.put(row, c, ch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_blank() {
        let s = HeadlessSurface::new(2, 3);
        assert_eq!(s.text(), "   \n   ");
        assert_eq!(s.cursor(), (0, 0));
        assert!(s.calls().is_empty());
    }

    #[test]
    fn print_advances_and_wraps() {
        let mut s = HeadlessSurface::new(2, 4);
        s.print("abcdef").unwrap();
        assert_eq!(s.row_text(0), "abcd");
        assert_eq!(s.row_text(1), "ef  ");
        assert_eq!(s.cursor(), (1, 2));
    }

    #[test]
    fn print_stops_at_bottom_right() {
        let mut s = HeadlessSurface::new(1, 3);
        s.print("abcdef").unwrap();
        assert_eq!(s.row_text(0), "abc");
        assert_eq!(s.cursor(), (0, 2));
    }

    #[test]
    fn wide_chars_take_two_cells() {
        let mut s = HeadlessSurface::new(2, 3);
        s.print("a中b").unwrap();
        assert_eq!(s.cell(0, 1), Some('中'));
        assert_eq!(s.cell(0, 2), None);
        assert_eq!(s.row_text(0), "a中");
        assert_eq!(s.row_text(1), "b  ");
    }

    #[test]
    fn wide_char_wraps_instead_of_splitting() {
        let mut s = HeadlessSurface::new(2, 3);
        s.print("ab中").unwrap();
        assert_eq!(s.row_text(0), "ab ");
        assert_eq!(s.cell(1, 0), Some('中'));
    }

    #[test]
    fn newline_moves_to_next_row() {
        let mut s = HeadlessSurface::new(3, 4);
        s.move_to(0, 2).unwrap();
        s.print("x\ny").unwrap();
        assert_eq!(s.row_text(0), "  x ");
        assert_eq!(s.row_text(1), "y   ");
    }

    #[test]
    fn move_out_of_range_errors_and_keeps_cursor() {
        let mut s = HeadlessSurface::new(2, 2);
        s.move_to(1, 1).unwrap();
        assert!(s.move_to(2, 0).is_err());
        assert_eq!(s.cursor(), (1, 1));
    }

    #[test]
    fn border_leaves_cursor() {
        let mut s = HeadlessSurface::new(3, 3);
        s.move_to(1, 1).unwrap();
        s.draw_border().unwrap();
        assert_eq!(s.text(), "┌─┐\n│ │\n└─┘");
        assert_eq!(s.cursor(), (1, 1));
    }

    #[test]
    fn lines_clip_at_edge() {
        let mut s = HeadlessSurface::new(3, 4);
        s.move_to(1, 2).unwrap();
        s.hline('-', 10).unwrap();
        s.vline('|', 10).unwrap();
        assert_eq!(s.row_text(1), "  |-");
        assert_eq!(s.row_text(2), "  | ");
        assert_eq!(s.cursor(), (1, 2));
    }

    #[test]
    fn clear_blanks_and_homes() {
        let mut s = HeadlessSurface::new(2, 2);
        s.print("abc").unwrap();
        s.clear().unwrap();
        assert_eq!(s.text(), "  \n  ");
        assert_eq!(s.cursor(), (0, 0));
    }

    #[test]
    fn call_log_and_refresh_count() {
        let mut s = HeadlessSurface::new(2, 2);
        s.clear().unwrap();
        s.print("a").unwrap();
        s.refresh().unwrap();
        assert_eq!(s.refresh_count(), 1);
        let calls = s.take_calls();
        assert_eq!(
            calls,
            vec![
                SurfaceCall::Clear,
                SurfaceCall::Print("a".into()),
                SurfaceCall::Refresh
            ]
        );
        assert!(s.calls().is_empty());
        assert!(!calls[0].is_draw());
        assert!(calls[1].is_draw());
    }

    #[test]
    fn resize_clamps_cursor() {
        let mut s = HeadlessSurface::new(10, 10);
        s.move_to(9, 9).unwrap();
        s.resize(4, 5);
        assert_eq!(s.extent(), Extent::new(4, 5));
        assert_eq!(s.cursor(), (3, 4));
    }

    #[test]
    fn zero_sized_surface_accepts_calls() {
        let mut s = HeadlessSurface::new(0, 0);
        s.print("abc").unwrap();
        s.draw_border().unwrap();
        s.hline('-', 3).unwrap();
        assert_eq!(s.text(), "");
    }
}
