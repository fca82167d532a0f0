//! Grid Configuration

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::Size;

/// Grid configuration read by every redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfiguration {
    /// Edge length of every cell
    pub cell_size: u32,
    /// Stroke cell borders on redraw
    pub grid_lines_visible: bool,
    /// Render cell fill colors on redraw
    pub paint_fill_enabled: bool,
}

impl GridConfiguration {
    pub const DEFAULT_CELL_SIZE: u32 = 10;
}

impl Default for GridConfiguration {
    fn default() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
            grid_lines_visible: true,
            paint_fill_enabled: false,
        }
    }
}

/// Inclusive range of cell sizes a surface can hold.
///
/// The range is empty when the surface's shorter edge is below ten units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSizeRange {
    pub min: u32,
    pub max: u32,
}

impl CellSizeRange {
    pub fn contains(&self, cell_size: u32) -> bool {
        (self.min..=self.max).contains(&cell_size)
    }

    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    /// Clamp into the range. Returns `None` for an empty range.
    pub fn clamp(&self, cell_size: u32) -> Option<u32> {
        (!self.is_empty()).then(|| cell_size.clamp(self.min, self.max))
    }
}

impl From<CellSizeRange> for RangeInclusive<u32> {
    fn from(range: CellSizeRange) -> Self {
        range.min..=range.max
    }
}

impl fmt::Display for CellSizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Allowed cell sizes for a surface: `[1, floor(min(width, height) / 10)]`
pub fn compute_allowed_cell_size_range(width: u32, height: u32) -> CellSizeRange {
    CellSizeRange {
        min: 1,
        max: Size::new(width, height).min_edge() / 10,
    }
}
