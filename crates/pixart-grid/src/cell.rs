//! Grid cells

use crate::Color;

/// Handle to a cell in one particular tiling.
///
/// Re-tiling bumps the model's generation, so handles obtained before a
/// re-tile no longer resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl CellId {
    /// Position in canonical raster order
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

/// One rectangular unit of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    /// Fill color set by painting or quantization
    pub fill: Option<Color>,
}

impl Cell {
    pub(crate) fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height, fill: None }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Center point in surface coordinates
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// Whether the open box `(x, x + w) × (y, y + h)` contains the point.
    ///
    /// Points on an edge belong to no cell.
    pub fn strictly_contains(&self, px: f64, py: f64) -> bool {
        let x_min = f64::from(self.x);
        let y_min = f64::from(self.y);
        let x_max = x_min + f64::from(self.width);
        let y_max = y_min + f64::from(self.height);

        px > x_min && px < x_max && py > y_min && py < y_max
    }
}
