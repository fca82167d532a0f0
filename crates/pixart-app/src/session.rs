//! Session - event handling
//!
//! One session owns the grid model, the compositor and the UI-side state
//! (picked color, pending image load). Every handler runs to completion and
//! ends with a full redraw when it changed anything.

use pixart_grid::{
    Color, GridError, GridModel, RasterImage, compute_allowed_cell_size_range,
};
use pixart_render::{Compositor, PixmapSurface, RenderError, Surface, fit_image_bounds};

use crate::{
    AppConfig, Controls, Downloads, FileDownloads, Ignored, InputEvent, LoadTicket, MouseButton,
    Outcome, SessionError,
};

/// Interactive pixel-art session
pub struct Session<S: Surface = PixmapSurface, D: Downloads = FileDownloads> {
    model: GridModel,
    compositor: Compositor<S>,
    downloads: D,
    selected_color: Option<Color>,
    /// Cell size the slider resets to when an image loads
    default_cell_size: u32,
    export_filename: String,
    latest_load: u64,
}

impl Session<PixmapSurface, FileDownloads> {
    /// Build a raster-backed session writing exports to `config.output_dir`
    pub fn from_config(config: &AppConfig) -> Result<Self, SessionError> {
        let model = GridModel::with_configuration(config.surface, config.grid)?;
        let surface = PixmapSurface::new(model.surface_size())?;
        let mut session = Self::new(model, surface, FileDownloads::new(&config.output_dir))?;
        session.export_filename = config.export_filename.clone();
        Ok(session)
    }
}

impl<S: Surface, D: Downloads> Session<S, D> {
    /// Create a session and draw the initial grid
    pub fn new(model: GridModel, surface: S, downloads: D) -> Result<Self, SessionError> {
        let mut session = Self {
            default_cell_size: model.cell_size(),
            model,
            compositor: Compositor::new(surface),
            downloads,
            selected_color: None,
            export_filename: crate::EXPORT_FILENAME.to_string(),
            latest_load: 0,
        };
        let size = session.model.surface_size();
        if session.compositor.surface().size() != size {
            session.compositor.surface_mut().resize(size)?;
        }
        session.redraw()?;
        tracing::info!("Session ready: {} surface, cell size {}", size, session.model.cell_size());
        Ok(session)
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn compositor(&self) -> &Compositor<S> {
        &self.compositor
    }

    pub fn downloads(&self) -> &D {
        &self.downloads
    }

    pub fn selected_color(&self) -> Option<Color> {
        self.selected_color
    }

    /// Dispatch one host event
    pub fn handle(&mut self, event: InputEvent) -> Result<Outcome, SessionError> {
        tracing::debug!("Handling {:?}", EventKind(&event));
        match event {
            InputEvent::SliderInput(cell_size) => self.slider_input(cell_size),
            InputEvent::SliderRelease => self.slider_release(),
            InputEvent::ToggleGridLines => self.toggle_grid_lines(),
            InputEvent::GeneratePixelArt => self.generate_pixel_art(),
            InputEvent::ClearImage => self.clear_image(),
            InputEvent::SaveImage => self.save_image(),
            InputEvent::ColorPicked(color) => Ok(self.select_color(color)),
            InputEvent::Click { x, y, button } => self.click(x, y, button),
            InputEvent::ImageDecoded { ticket, result } => self.image_decoded(ticket, result),
        }
    }

    /// Host widget state derived from the model
    pub fn controls(&self) -> Controls {
        let range = self.model.allowed_cell_sizes();
        let has_image = self.model.has_background_image();
        Controls {
            slider_min: range.min,
            slider_max: range.max,
            slider_value: self.model.cell_size(),
            grid_toggle_label: Controls::grid_label(self.model.grid_lines_visible()),
            generate_enabled: has_image,
            clear_enabled: has_image,
            selected_color: self.selected_color,
        }
    }

    // Size slider

    /// Slider moved: lines forced on and kept on, grid rebuilt at the new size
    pub fn slider_input(&mut self, cell_size: u32) -> Result<Outcome, SessionError> {
        self.compositor.set_cell_size(&mut self.model, cell_size)?;
        self.model.set_grid_lines_visible(true);
        self.model.set_paint_fill_enabled(false);
        self.redraw()?;
        Ok(Outcome::Redrawn)
    }

    /// Slider released: re-fit the surface to the image at the chosen size
    pub fn slider_release(&mut self) -> Result<Outcome, SessionError> {
        if self.model.has_background_image() {
            self.compositor.resize_surface_to_image(&mut self.model)?;
            self.model.set_paint_fill_enabled(false);
        }
        self.redraw()?;
        Ok(Outcome::Redrawn)
    }

    // Grid lines

    pub fn toggle_grid_lines(&mut self) -> Result<Outcome, SessionError> {
        let visible = self.model.toggle_grid_lines_visible();
        tracing::debug!("Grid lines {}", Controls::grid_label(visible));
        self.redraw()?;
        Ok(Outcome::Redrawn)
    }

    pub fn set_grid_lines_visible(&mut self, visible: bool) -> Result<Outcome, SessionError> {
        self.model.set_grid_lines_visible(visible);
        self.redraw()?;
        Ok(Outcome::Redrawn)
    }

    /// Show or hide cell fills without touching the stored colors
    pub fn set_paint_fill_enabled(&mut self, enabled: bool) -> Result<Outcome, SessionError> {
        self.model.set_paint_fill_enabled(enabled);
        self.redraw()?;
        Ok(Outcome::Redrawn)
    }

    // Coloring

    /// Quantize the background image into the grid with lines hidden
    pub fn generate_pixel_art(&mut self) -> Result<Outcome, SessionError> {
        if !self.model.has_background_image() {
            tracing::warn!("Generate ignored: no background image");
            return Ok(Outcome::Ignored(Ignored::NoActiveImage));
        }
        self.with_grid_lines_forced(false, |model, compositor| {
            compositor.quantize_image_to_grid(model)?;
            Ok(Outcome::Redrawn)
        })
    }

    pub fn select_color(&mut self, color: Color) -> Outcome {
        self.selected_color = Some(color);
        Outcome::ColorSelected(color)
    }

    /// Paint the cell under a click with the picked color.
    ///
    /// Requires a primary-button click, a background image and a picked color.
    pub fn click(&mut self, x: f64, y: f64, button: MouseButton) -> Result<Outcome, SessionError> {
        if button != MouseButton::Primary {
            return Ok(Outcome::Ignored(Ignored::NonPrimaryButton));
        }
        if !self.model.has_background_image() {
            return Ok(Outcome::Ignored(Ignored::NoActiveImage));
        }
        let Some(color) = self.selected_color else {
            return Ok(Outcome::Ignored(Ignored::NoColorSelected));
        };
        let Some(id) = self.model.hit_test(x, y) else {
            return Ok(Outcome::Ignored(Ignored::NoCellHit));
        };

        self.with_grid_lines_forced(false, |model, _| {
            model.paint_cell(id, color)?;
            model.set_paint_fill_enabled(true);
            Ok(Outcome::Painted(id))
        })
    }

    // Background image

    /// Reserve a ticket for an image load about to start
    pub fn begin_image_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        LoadTicket(self.latest_load)
    }

    /// Apply a finished decode if it belongs to the latest requested load
    pub fn image_decoded(
        &mut self,
        ticket: LoadTicket,
        result: Result<RasterImage, RenderError>,
    ) -> Result<Outcome, SessionError> {
        if ticket.0 != self.latest_load {
            tracing::debug!("Dropping superseded image load {:?}", ticket);
            return Ok(Outcome::Ignored(Ignored::SupersededLoad));
        }
        match result {
            Ok(image) => self.load_image(image),
            Err(err) => {
                tracing::warn!("Image load failed: {}", err);
                Err(err.into())
            }
        }
    }

    /// Install a decoded image.
    ///
    /// The surface is fitted to the image and the cell size resets to the
    /// default, clamped to what the fitted surface allows. Either everything
    /// is applied or nothing is.
    pub fn load_image(&mut self, image: RasterImage) -> Result<Outcome, SessionError> {
        let bounds = fit_image_bounds(image.size());
        let range = compute_allowed_cell_size_range(bounds.width, bounds.height);
        let cell_size = range.clamp(self.default_cell_size).ok_or(GridError::InvalidConfiguration {
            requested: self.default_cell_size,
            range,
        })?;

        self.compositor.apply_geometry(&mut self.model, bounds, cell_size)?;
        tracing::info!(
            "Loaded {}x{} image onto {} surface, cell size {}",
            image.width(), image.height(), self.model.surface_size(), cell_size
        );
        self.model.set_background_image(Some(image));
        self.model.set_paint_fill_enabled(false);
        self.redraw()?;
        Ok(Outcome::Redrawn)
    }

    /// Drop the background image and every fill
    pub fn clear_image(&mut self) -> Result<Outcome, SessionError> {
        self.model.set_background_image(None);
        self.model.retile();
        self.model.set_paint_fill_enabled(false);
        self.redraw()?;
        Ok(Outcome::Redrawn)
    }

    // Export

    /// Encode the surface and hand it to the download sink
    pub fn save_image(&mut self) -> Result<Outcome, SessionError> {
        let bytes = self.compositor.export_png()?;
        self.downloads.deliver(&self.export_filename, &bytes)?;
        Ok(Outcome::Exported {
            filename: self.export_filename.clone(),
            bytes: bytes.len(),
        })
    }

    // Helpers

    fn redraw(&mut self) -> Result<(), SessionError> {
        self.compositor.redraw_all(&self.model)?;
        Ok(())
    }

    /// Run `action` with grid lines forced to `visible`, then restore the
    /// previous visibility and redraw. Restoration happens on every exit
    /// path, including a failed action.
    fn with_grid_lines_forced<T>(
        &mut self,
        visible: bool,
        action: impl FnOnce(&mut GridModel, &mut Compositor<S>) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let result = {
            let mut scope = self.model.scoped_grid_lines(visible);
            self.compositor.redraw_all(&scope)?;
            action(&mut *scope, &mut self.compositor)
        };
        self.redraw()?;
        result
    }
}

/// Event name without its payload
struct EventKind<'a>(&'a InputEvent);

impl std::fmt::Debug for EventKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            InputEvent::SliderInput(n) => return write!(f, "SliderInput({})", n),
            InputEvent::SliderRelease => "SliderRelease",
            InputEvent::ToggleGridLines => "ToggleGridLines",
            InputEvent::GeneratePixelArt => "GeneratePixelArt",
            InputEvent::ClearImage => "ClearImage",
            InputEvent::SaveImage => "SaveImage",
            InputEvent::ColorPicked(c) => return write!(f, "ColorPicked({})", c),
            InputEvent::Click { x, y, .. } => return write!(f, "Click({}, {})", x, y),
            InputEvent::ImageDecoded { .. } => "ImageDecoded",
        };
        f.write_str(name)
    }
}
