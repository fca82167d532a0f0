//! Command-line arguments
//!
//! `pixart [IMAGE] [--cell-size N] [--hide-grid] [--paint X,Y,COLOR]...
//! [--out DIR] [--config FILE]`
//!
//! Options take their value either as the next argument or after `=`.

use std::path::PathBuf;

use pixart_grid::Color;

/// One click to replay after generating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintCommand {
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

impl std::str::FromStr for PaintCommand {
    type Err = ArgsError;

    /// Parse `X,Y,COLOR`. The color may itself contain commas (`rgb(...)`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ArgsError::InvalidValue("--paint", s.to_string());
        let mut parts = s.splitn(3, ',');
        let x: f64 = parts.next().and_then(|v| v.trim().parse().ok()).ok_or_else(invalid)?;
        let y: f64 = parts.next().and_then(|v| v.trim().parse().ok()).ok_or_else(invalid)?;
        let color: Color = parts.next().and_then(|v| v.trim().parse().ok()).ok_or_else(invalid)?;
        Ok(Self { x, y, color })
    }
}

/// Parsed command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    /// Image to load
    pub image: Option<PathBuf>,
    /// Cell size chosen on the slider after loading
    pub cell_size: Option<u32>,
    /// Export without grid lines
    pub hide_grid: bool,
    /// Clicks replayed in order
    pub paints: Vec<PaintCommand>,
    /// Output directory override
    pub out_dir: Option<PathBuf>,
    /// JSON config file
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse from the process arguments
    pub fn parse() -> Result<Self, ArgsError> {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse from an argument list without the program name
    pub fn parse_from(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
                _ => (arg.clone(), None),
            };

            let mut value = |name: &'static str| {
                inline.clone().or_else(|| args.next()).ok_or(ArgsError::MissingValue(name))
            };

            match flag.as_str() {
                "--cell-size" => {
                    let raw = value("--cell-size")?;
                    let n = raw.parse().map_err(|_| ArgsError::InvalidValue("--cell-size", raw))?;
                    parsed.cell_size = Some(n);
                }
                "--hide-grid" => parsed.hide_grid = true,
                "--paint" => parsed.paints.push(value("--paint")?.parse()?),
                "--out" => parsed.out_dir = Some(PathBuf::from(value("--out")?)),
                "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
                other if other.starts_with("--") => {
                    return Err(ArgsError::UnknownFlag(other.to_string()));
                }
                _ if parsed.image.is_none() => parsed.image = Some(PathBuf::from(arg)),
                _ => return Err(ArgsError::UnexpectedArgument(arg)),
            }
        }

        Ok(parsed)
    }
}

/// Command-line error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("Missing value for {0}")]
    MissingValue(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Unknown option: {0}")]
    UnknownFlag(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}
