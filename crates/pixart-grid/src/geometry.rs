//! Surface geometry

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width and height in surface units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Shorter of the two edges
    pub fn min_edge(&self) -> u32 {
        self.width.min(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Snap both dimensions down to the nearest multiple of `cell_size`.
///
/// A `cell_size` of zero leaves the size untouched.
pub fn snap_to_cell(size: Size, cell_size: u32) -> Size {
    if cell_size == 0 {
        return size;
    }
    Size {
        width: size.width - size.width % cell_size,
        height: size.height - size.height % cell_size,
    }
}
