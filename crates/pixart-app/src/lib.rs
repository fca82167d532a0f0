//! pixart App
//!
//! Wires host input events to the grid model and compositor.
//!
//! Host controls arrive as a typed `InputEvent` stream handled by one
//! explicitly constructed `Session`.

mod cli;
mod config;
mod downloads;
mod event;
mod loader;
mod session;

pub use cli::{Args, ArgsError, PaintCommand};
pub use config::{AppConfig, ConfigError};
pub use downloads::{Downloads, FileDownloads, MemoryDownloads};
pub use event::{Controls, Ignored, InputEvent, LoadTicket, MouseButton, Outcome};
pub use loader::{load_image_bytes, load_image_file};
pub use session::Session;

use pixart_render::RenderError;

/// Fixed filename for exported images
pub const EXPORT_FILENAME: &str = "pixel-art.png";

/// Session error
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Download failed: {0}")]
    Download(#[from] std::io::Error),
}

impl From<pixart_grid::GridError> for SessionError {
    fn from(err: pixart_grid::GridError) -> Self {
        SessionError::Render(RenderError::Grid(err))
    }
}

impl SessionError {
    /// Whether the error rejected a cell size or image geometry
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            SessionError::Render(RenderError::Grid(pixart_grid::GridError::InvalidConfiguration { .. }))
        )
    }
}
