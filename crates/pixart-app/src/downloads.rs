//! Download sinks
//!
//! Exported images are handed to a sink together with a suggested filename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Receives exported files
pub trait Downloads {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Writes downloads into a directory
#[derive(Debug, Clone)]
pub struct FileDownloads {
    download_dir: PathBuf,
}

impl FileDownloads {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self { download_dir: download_dir.into() }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }
}

impl Downloads for FileDownloads {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.download_dir)?;
        let path = self.download_dir.join(filename);
        fs::write(&path, bytes)?;
        tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

/// Keeps downloads in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDownloads {
    pub files: Vec<(String, Vec<u8>)>,
}

impl MemoryDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent download
    pub fn last(&self) -> Option<&(String, Vec<u8>)> {
        self.files.last()
    }
}

impl Downloads for MemoryDownloads {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        self.files.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}
