//! Screenshot saving utilities for persisting session screenshots to disk

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::Result;

/// Writes screenshots into a single directory with timestamped filenames
#[derive(Debug, Clone)]
pub struct ScreenshotSaver {
    dir: PathBuf,
}

impl ScreenshotSaver {
    /// Create a saver for `dir`
    ///
    /// # Arguments
    /// * `dir` - Directory for saved screenshots, created on first save
    ///
    /// # Returns
    /// A new ScreenshotSaver instance
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Build the filename for a screenshot taken at `at`
    ///
    /// Format: `screenshot_<name>_YYYYMMDD_HHMMSS.png`, or
    /// `screenshot_YYYYMMDD_HHMMSS.png` without a name.
    pub fn filename(name: Option<&str>, at: DateTime<Local>) -> String {
        let timestamp = at.format("%Y%m%d_%H%M%S");
        match name {
            Some(name) if !name.is_empty() => format!("screenshot_{}_{}.png", name, timestamp),
            _ => format!("screenshot_{}.png", timestamp),
        }
    }

    /// Save a screenshot to disk
    ///
    /// # Arguments
    /// * `name` - Optional tag placed in the filename
    /// * `base64_data` - Base64-encoded PNG image data
    ///
    /// # Returns
    /// Path to the saved screenshot
    pub async fn save(&self, name: Option<&str>, base64_data: &str) -> Result<PathBuf> {
        let image_data = general_purpose::STANDARD.decode(base64_data.trim())?;

        fs::create_dir_all(&self.dir).await?;

        let file_path = self.dir.join(Self::filename(name, Local::now()));
        fs::write(&file_path, &image_data).await?;

        debug!(
            "Saved screenshot: {} ({} bytes)",
            file_path.display(),
            image_data.len()
        );

        Ok(file_path)
    }

    /// Get the screenshot directory path
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
