//! pixart Grid - Cell Model
//!
//! The grid of uniformly sized cells laid over a raster surface.
//!
//! This crate provides:
//! - `GridModel`: the cell collection, grid configuration and background image
//! - Re-tiling, hit-testing and color assignment
//! - `Color` with hex and `rgb()` conversions for UI boundaries
//! - `RasterImage`, a decoded RGBA image that can be sampled per cell

mod cell;
mod config;
mod geometry;
mod model;
mod raster;

pub use cell::{Cell, CellId};
pub use config::{GridConfiguration, CellSizeRange, compute_allowed_cell_size_range};
pub use geometry::{Size, snap_to_cell};
pub use model::{GridModel, GridLinesScope};
pub use raster::{RasterImage, RasterError};

use std::fmt;
use std::str::FromStr;

/// Color (RGB)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from hex string (e.g., "#ff0000" or "f00")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::rgb(r, g, b))
            }
            _ => None,
        }
    }

    /// Parse a functional `rgb(r, g, b)` string
    pub fn from_rgb_function(s: &str) -> Option<Self> {
        let inner = s.trim()
            .strip_prefix("rgb(")?
            .strip_suffix(')')?;

        let mut channels = inner.split(',').map(|c| c.trim().parse::<u8>());
        let r = channels.next()?.ok()?;
        let g = channels.next()?.ok()?;
        let b = channels.next()?.ok()?;
        if channels.next().is_some() {
            return None;
        }
        Some(Color::rgb(r, g, b))
    }

    /// Channels as an array
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::rgb(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if s.starts_with("rgb(") {
            Color::from_rgb_function(s)
        } else {
            Color::from_hex(s)
        };
        parsed.ok_or_else(|| ColorParseError(s.to_string()))
    }
}

/// Color parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color: {0:?}")]
pub struct ColorParseError(pub String);

/// Grid error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Invalid configuration: cell size {requested} outside allowed range {range}")]
    InvalidConfiguration { requested: u32, range: CellSizeRange },

    #[error("Cell handle is from an earlier tiling")]
    StaleCell,

    #[error("Sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },
}
