//! Input events and handler outcomes

use pixart_grid::{CellId, Color, ColorParseError, RasterImage};
use pixart_render::RenderError;

/// Mouse button of a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Identifies one requested image load.
///
/// Only the most recently requested load is applied when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(pub(crate) u64);

/// Discrete event from the host UI
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Size slider moved to a value
    SliderInput(u32),
    /// Size slider released
    SliderRelease,
    /// Grid visibility button pressed
    ToggleGridLines,
    /// Generate pixel art button pressed
    GeneratePixelArt,
    /// Clear background image button pressed
    ClearImage,
    /// Save image button pressed
    SaveImage,
    /// Color picker changed
    ColorPicked(Color),
    /// Click on the surface
    Click { x: f64, y: f64, button: MouseButton },
    /// Image decode finished
    ImageDecoded {
        ticket: LoadTicket,
        result: Result<RasterImage, RenderError>,
    },
}

impl InputEvent {
    /// Build a `ColorPicked` event from a picker value (`#rrggbb` or `rgb(...)`)
    pub fn color_picked(value: &str) -> Result<Self, ColorParseError> {
        value.parse().map(InputEvent::ColorPicked)
    }

    pub fn click(x: f64, y: f64) -> Self {
        InputEvent::Click { x, y, button: MouseButton::Primary }
    }
}

/// Why an event changed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Needs a background image
    NoActiveImage,
    /// Needs a picked color
    NoColorSelected,
    /// Click landed on an edge or outside the surface
    NoCellHit,
    /// Click was not with the primary button
    NonPrimaryButton,
    /// A newer image load was requested after this one
    SupersededLoad,
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed and the surface was redrawn
    Redrawn,
    /// A cell was painted and the surface redrawn
    Painted(CellId),
    /// Picker color stored
    ColorSelected(Color),
    /// Surface exported
    Exported { filename: String, bytes: usize },
    /// Nothing happened
    Ignored(Ignored),
}

/// Snapshot of host widget state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub slider_min: u32,
    pub slider_max: u32,
    pub slider_value: u32,
    /// Grid toggle button text
    pub grid_toggle_label: &'static str,
    pub generate_enabled: bool,
    pub clear_enabled: bool,
    pub selected_color: Option<Color>,
}

impl Controls {
    pub(crate) fn grid_label(visible: bool) -> &'static str {
        if visible { "Grid Visible" } else { "Grid Hidden" }
    }
}
