#![forbid(unsafe_code)]

//! Window placement as fractions of the terminal.
//!
//! A [`WindowSpec`] describes where a window sits relative to the whole
//! terminal, so the same layout can be re-resolved after every resize:
//!
//! ```
//! use screenplay_core::{Extent, Rect, WindowSpec};
//!
//! // Left half, full height.
//! let left = WindowSpec::new(1.0, 0.5, 0.0, 0.0);
//! assert_eq!(left.resolve(Extent::new(24, 80)), Rect::new(0, 0, 40, 24));
//! ```

use crate::geometry::{Extent, Rect};

/// Fractional window placement: size and origin relative to the terminal.
///
/// All four fields are fractions in `[0, 1]`; out-of-range values (and NaN)
/// are clamped when resolving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    /// Height as a fraction of terminal rows.
    pub height: f64,
    /// Width as a fraction of terminal columns.
    pub width: f64,
    /// Top edge as a fraction of terminal rows.
    pub top: f64,
    /// Left edge as a fraction of terminal columns.
    pub left: f64,
}

impl WindowSpec {
    /// Create a spec from `(height, width, top, left)` fractions.
    #[must_use]
    pub const fn new(height: f64, width: f64, top: f64, left: f64) -> Self {
        Self {
            height,
            width,
            top,
            left,
        }
    }

    /// A spec covering the whole terminal.
    #[must_use]
    pub const fn full() -> Self {
        Self::new(1.0, 1.0, 0.0, 0.0)
    }

    /// Resolve this spec against the current terminal size.
    ///
    /// Each coordinate is truncated toward zero. The result never extends
    /// past the terminal.
    #[must_use]
    pub fn resolve(&self, terminal: Extent) -> Rect {
        let y = scale(terminal.rows, self.top);
        let x = scale(terminal.cols, self.left);
        let height = scale(terminal.rows, self.height).min(terminal.rows - y);
        let width = scale(terminal.cols, self.width).min(terminal.cols - x);
        Rect::new(x, y, width, height)
    }
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self::full()
    }
}

fn scale(total: u16, fraction: f64) -> u16 {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    (f64::from(total) * fraction) as u16
}
