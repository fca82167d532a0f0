//! Grid Model
//!
//! Owns the cell collection, the grid configuration and the optional
//! background image.
//!
//! The model tracks two sizes. `bounds` is what the host or the fitted image
//! asks for; `surface` is `bounds` snapped down to a multiple of the cell
//! size. Cells always tile `surface` exactly, and the allowed cell-size range
//! is derived from `bounds`.

use std::ops::{Deref, DerefMut};

use crate::{
    Cell, CellId, CellSizeRange, Color, GridConfiguration, GridError, RasterImage, Size,
    compute_allowed_cell_size_range, snap_to_cell,
};

/// Cell grid over a raster surface
#[derive(Debug, Clone)]
pub struct GridModel {
    config: GridConfiguration,
    bounds: Size,
    surface: Size,
    /// Cells in canonical raster order (x outer, y inner)
    cells: Vec<Cell>,
    generation: u32,
    background: Option<RasterImage>,
}

impl GridModel {
    /// Create a model with the default configuration
    pub fn new(bounds: Size) -> Result<Self, GridError> {
        Self::with_configuration(bounds, GridConfiguration::default())
    }

    /// Create a model with an explicit configuration
    pub fn with_configuration(bounds: Size, config: GridConfiguration) -> Result<Self, GridError> {
        let surface = validate(bounds, config.cell_size)?;
        let mut model = Self {
            config,
            bounds,
            surface,
            cells: Vec::new(),
            generation: 0,
            background: None,
        };
        model.retile();
        Ok(model)
    }

    pub fn configuration(&self) -> &GridConfiguration {
        &self.config
    }

    pub fn cell_size(&self) -> u32 {
        self.config.cell_size
    }

    pub fn grid_lines_visible(&self) -> bool {
        self.config.grid_lines_visible
    }

    pub fn paint_fill_enabled(&self) -> bool {
        self.config.paint_fill_enabled
    }

    /// Requested bounds before snapping
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Surface size the cells tile
    pub fn surface_size(&self) -> Size {
        self.surface
    }

    /// Cell sizes the current bounds allow
    pub fn allowed_cell_sizes(&self) -> CellSizeRange {
        compute_allowed_cell_size_range(self.bounds.width, self.bounds.height)
    }

    /// Cells in canonical raster order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        if id.generation != self.generation {
            return None;
        }
        self.cells.get(id.index())
    }

    /// Handles for every cell in canonical order
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cells.len() as u32).map(|index| CellId {
            index,
            generation: self.generation,
        })
    }

    // Geometry

    /// Validate a reshape without mutating anything.
    ///
    /// Returns the surface size the reshape would produce.
    pub fn plan_reshape(&self, bounds: Size, cell_size: u32) -> Result<Size, GridError> {
        validate(bounds, cell_size)
    }

    /// Replace bounds and cell size together, then re-tile.
    ///
    /// Nothing changes when validation fails.
    pub fn reshape(&mut self, bounds: Size, cell_size: u32) -> Result<Size, GridError> {
        let surface = validate(bounds, cell_size)?;
        self.bounds = bounds;
        self.config.cell_size = cell_size;
        self.surface = surface;
        self.retile();
        Ok(surface)
    }

    /// Change the cell size, clearing every fill color
    pub fn set_cell_size(&mut self, cell_size: u32) -> Result<(), GridError> {
        self.reshape(self.bounds, cell_size).map(|_| ())
    }

    /// Change the bounds, keeping the cell size
    pub fn resize_bounds(&mut self, bounds: Size) -> Result<(), GridError> {
        self.reshape(bounds, self.config.cell_size).map(|_| ())
    }

    /// Rebuild the cell collection for the current surface and cell size.
    ///
    /// Creation order is x-major, then y. Quantization zips samples against
    /// this order, so it must not change.
    pub fn retile(&mut self) {
        let step = self.config.cell_size;

        self.cells.clear();
        self.cells.reserve(cell_count(self.surface, step));
        for x in (0..self.surface.width).step_by(step as usize) {
            for y in (0..self.surface.height).step_by(step as usize) {
                self.cells.push(Cell::new(x, y, step, step));
            }
        }
        self.generation = self.generation.wrapping_add(1);

        tracing::debug!(
            "Retiled {}x{} surface into {} cells of {}",
            self.surface.width, self.surface.height, self.cells.len(), step
        );
    }

    // Queries and color assignment

    /// Find the cell whose open box strictly contains the point.
    ///
    /// Points on a shared edge or outside the surface hit nothing.
    pub fn hit_test(&self, px: f64, py: f64) -> Option<CellId> {
        self.cells
            .iter()
            .position(|cell| cell.strictly_contains(px, py))
            .map(|index| CellId {
                index: index as u32,
                generation: self.generation,
            })
    }

    /// Set a cell's fill color
    pub fn paint_cell(&mut self, id: CellId, color: Color) -> Result<(), GridError> {
        if id.generation != self.generation {
            return Err(GridError::StaleCell);
        }
        let cell = self.cells.get_mut(id.index()).ok_or(GridError::StaleCell)?;
        cell.fill = Some(color);
        Ok(())
    }

    /// Assign one sample per cell, positionally, in canonical order
    pub fn assign_fill_colors(&mut self, samples: &[Color]) -> Result<(), GridError> {
        if samples.len() != self.cells.len() {
            return Err(GridError::SampleCountMismatch {
                expected: self.cells.len(),
                actual: samples.len(),
            });
        }
        for (cell, &color) in self.cells.iter_mut().zip(samples) {
            cell.fill = Some(color);
        }
        Ok(())
    }

    // Background image

    pub fn background_image(&self) -> Option<&RasterImage> {
        self.background.as_ref()
    }

    pub fn has_background_image(&self) -> bool {
        self.background.is_some()
    }

    /// Replace the background image, returning the previous one.
    ///
    /// Does not re-tile.
    pub fn set_background_image(&mut self, image: Option<RasterImage>) -> Option<RasterImage> {
        std::mem::replace(&mut self.background, image)
    }

    // Configuration flags

    /// Flip grid-line visibility, returning the new value
    pub fn toggle_grid_lines_visible(&mut self) -> bool {
        self.config.grid_lines_visible = !self.config.grid_lines_visible;
        self.config.grid_lines_visible
    }

    pub fn set_grid_lines_visible(&mut self, visible: bool) {
        self.config.grid_lines_visible = visible;
    }

    pub fn set_paint_fill_enabled(&mut self, enabled: bool) {
        self.config.paint_fill_enabled = enabled;
    }

    /// Force grid-line visibility until the returned scope is dropped
    pub fn scoped_grid_lines(&mut self, visible: bool) -> GridLinesScope<'_> {
        let prior = self.config.grid_lines_visible;
        self.config.grid_lines_visible = visible;
        GridLinesScope { model: self, prior }
    }
}

/// Cells needed to tile `surface`, widened before multiplying
fn cell_count(surface: Size, cell_size: u32) -> usize {
    let columns = (surface.width / cell_size) as usize;
    let rows = (surface.height / cell_size) as usize;
    columns * rows
}

fn validate(bounds: Size, cell_size: u32) -> Result<Size, GridError> {
    let range = compute_allowed_cell_size_range(bounds.width, bounds.height);
    if !range.contains(cell_size) {
        tracing::warn!("Rejected cell size {} (allowed {})", cell_size, range);
        return Err(GridError::InvalidConfiguration {
            requested: cell_size,
            range,
        });
    }
    Ok(snap_to_cell(bounds, cell_size))
}

/// Grid-line visibility override.
///
/// Restores the visibility that was active before
/// [`GridModel::scoped_grid_lines`] when dropped.
pub struct GridLinesScope<'a> {
    model: &'a mut GridModel,
    prior: bool,
}

impl GridLinesScope<'_> {
    /// Visibility that will be restored
    pub fn prior(&self) -> bool {
        self.prior
    }
}

impl Deref for GridLinesScope<'_> {
    type Target = GridModel;

    fn deref(&self) -> &GridModel {
        self.model
    }
}

impl DerefMut for GridLinesScope<'_> {
    fn deref_mut(&mut self) -> &mut GridModel {
        self.model
    }
}

impl Drop for GridLinesScope<'_> {
    fn drop(&mut self) {
        self.model.config.grid_lines_visible = self.prior;
    }
}
