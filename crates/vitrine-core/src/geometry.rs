//! Surface-space geometry.

/// Horizontal surface units covered by one terminal cell.
pub const CELL_WIDTH_UNITS: f64 = 8.0;

/// Vertical surface units covered by one terminal cell.
pub const CELL_HEIGHT_UNITS: f64 = 16.0;

/// A position in surface units, y growing downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Center of the terminal cell at `column`, `row`.
    pub fn from_cell(column: u16, row: u16) -> Self {
        Self {
            x: (column as f64 + 0.5) * CELL_WIDTH_UNITS,
            y: (row as f64 + 0.5) * CELL_HEIGHT_UNITS,
        }
    }
}

/// Dimensions of the display area, in surface units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Negative or non-finite dimensions collapse to zero.
    pub fn new(width: f64, height: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Viewport covering a terminal area of `columns` x `rows` cells.
    pub fn from_cells(columns: u16, rows: u16) -> Self {
        Self::new(
            columns as f64 * CELL_WIDTH_UNITS,
            rows as f64 * CELL_HEIGHT_UNITS,
        )
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}
