#![forbid(unsafe_code)]

//! Geometric primitives.

/// Size of a drawing surface in character cells.
///
/// Rows come first to match the `(y, x)` argument order of draw records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    /// Number of addressable rows.
    pub rows: u16,
    /// Number of addressable columns.
    pub cols: u16,
}

impl Extent {
    /// Create a new extent.
    #[inline]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Check if the extent has no addressable cell.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Check if `(row, col)` names an addressable cell.
    #[inline]
    pub const fn contains(&self, row: u16, col: u16) -> bool {
        row < self.rows && col < self.cols
    }

    /// Number of cells covered.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.rows as u32 * self.cols as u32
    }
}

/// A rectangle in terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin covering `extent`.
    #[inline]
    pub const fn from_extent(extent: Extent) -> Self {
        Self::new(0, 0, extent.cols, extent.rows)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The size of this rectangle as a surface extent.
    #[inline]
    pub const fn extent(&self) -> Extent {
        Extent::new(self.height, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_contains_is_exclusive() {
        let e = Extent::new(24, 80);
        assert!(e.contains(0, 0));
        assert!(e.contains(23, 79));
        assert!(!e.contains(24, 0));
        assert!(!e.contains(0, 80));
    }

    #[test]
    fn extent_empty() {
        assert!(Extent::new(0, 80).is_empty());
        assert!(Extent::new(24, 0).is_empty());
        assert!(!Extent::new(1, 1).is_empty());
        assert_eq!(Extent::new(24, 80).area(), 1920);
    }

    #[test]
    fn rect_edges_saturate() {
        let r = Rect::new(u16::MAX - 1, 0, 10, 10);
        assert_eq!(r.right(), u16::MAX);
        assert_eq!(r.bottom(), 10);
    }

    #[test]
    fn rect_extent_swaps_axes() {
        let r = Rect::new(3, 4, 40, 12);
        assert_eq!(r.extent(), Extent::new(12, 40));
        assert_eq!(Rect::from_extent(Extent::new(12, 40)), Rect::new(0, 0, 40, 12));
    }

    #[test]
    fn rect_contains() {
        let r = Rect::new(10, 5, 4, 2);
        assert!(r.contains(10, 5));
        assert!(r.contains(13, 6));
        assert!(!r.contains(14, 5));
        assert!(!r.contains(10, 7));
    }
}
