//! An immutable integer-cell grid for map representation.
//!
//! [`Cell`] is a newtype over `i32` with caller-defined semantics (terrain
//! markers, cost classes, and so on). [`Grid`] stores one `Cell` per
//! coordinate in flat row-major order and is never mutated after
//! construction: search code only borrows it.

use crate::geom::{Point, Range};

/// A map cell value, wrapping an `i32`.
///
/// The meaning of the value is up to the caller; the provided sentinels
/// cover the common open/blocked case used by the default walkability
/// predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell(pub i32);

impl Cell {
    /// Sentinel for an open, walkable cell.
    pub const OPEN: Cell = Cell(0);
    /// Sentinel for a blocked cell.
    pub const BLOCKED: Cell = Cell(-1);

    /// Create a new cell with the given value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the underlying integer value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl From<Cell> for i32 {
    fn from(c: Cell) -> Self {
        c.0
    }
}

/// An immutable 2D grid of [`Cell`] values.
///
/// Dimensions must be at least 1×1. Search code never indexes outside the
/// grid on its own: callers are expected to border the map with non-walkable
/// sentinel cells so that rays always terminate before the edge.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid filled with `fill`.
    ///
    /// # Panics
    /// Panics if `width` or `height` is less than 1.
    pub fn new(width: i32, height: i32, fill: Cell) -> Self {
        assert!(width >= 1 && height >= 1, "grid dimensions must be >= 1");
        Self {
            cells: vec![fill; (width * height) as usize],
            bounds: Range::new(0, 0, width, height),
        }
    }

    /// Create a grid by evaluating `f` at every point, in row-major order.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> Cell) -> Self {
        let bounds = Range::new(0, 0, width, height);
        assert!(!bounds.is_empty(), "grid dimensions must be >= 1");
        let cells = bounds.iter().map(&mut f).collect();
        Self { cells, bounds }
    }

    /// Parse a grid from text rows: `'.'` becomes [`Cell::OPEN`] and `'#'`
    /// becomes [`Cell::BLOCKED`]. Rows must all have the same width.
    ///
    /// Intended for map fixtures in tests and small demos; the text should
    /// include its own blocked border.
    ///
    /// # Panics
    /// Panics on ragged rows, empty input, or unknown characters.
    pub fn parse(text: &str) -> Self {
        let rows: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        assert!(!rows.is_empty(), "cannot parse an empty map");
        let width = rows[0].chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in &rows {
            assert_eq!(row.chars().count(), width, "ragged map row: {row:?}");
            for ch in row.chars() {
                cells.push(match ch {
                    '.' => Cell::OPEN,
                    '#' => Cell::BLOCKED,
                    other => panic!("unknown map character {other:?}"),
                });
            }
        }
        Self {
            cells,
            bounds: Range::new(0, 0, width as i32, rows.len() as i32),
        }
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Width of the grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height of the grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether the grid contains the given point.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The cell at `p`.
    ///
    /// Containment is asserted in debug builds only; callers are expected
    /// to keep their points inside [`bounds`](Self::bounds), typically by
    /// carrying a non-walkable border on the map. In release an
    /// out-of-bounds point whose flat index still lands in the backing
    /// storage reads an unrelated cell.
    #[inline]
    pub fn get(&self, p: Point) -> Cell {
        debug_assert!(self.contains(p), "point {p} outside grid {}", self.bounds);
        self.cells[(p.y * self.bounds.width() + p.x) as usize]
    }
}
