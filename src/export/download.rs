use std::fs;
use std::path::{Path, PathBuf};

use crate::foundation::core::DayKey;
use crate::foundation::error::{LoomError, LoomResult};

/// Result of a copy or download request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The PNG is on the clipboard.
    Copied,
    /// The PNG was written to this file.
    Downloaded(PathBuf),
    /// There was no pattern to export.
    Skipped,
    /// Neither path worked.
    Failed(String),
}

/// Directory that receives `loom-<day>.png` files.
#[derive(Clone, Debug)]
pub struct Downloads {
    dir: PathBuf,
}

impl Downloads {
    /// Downloads into `dir`, created on first use.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// `$XDG_DOWNLOAD_DIR`, then `~/Downloads`, then the working directory.
    pub fn default_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os("XDG_DOWNLOAD_DIR") {
            return PathBuf::from(dir);
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join("Downloads");
        }
        PathBuf::from(".")
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name used for `day`.
    pub fn file_name(day: DayKey) -> String {
        format!("loom-{day}.png")
    }

    /// Write `png` as `loom-<day>.png`, replacing an earlier export of the same day.
    pub fn save(&self, day: DayKey, png: &[u8]) -> LoomResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            LoomError::export(format!(
                "create downloads dir '{}': {e}",
                self.dir.display()
            ))
        })?;
        let path = self.dir.join(Self::file_name(day));
        fs::write(&path, png)
            .map_err(|e| LoomError::export(format!("write '{}': {e}", path.display())))?;
        tracing::debug!(path = %path.display(), bytes = png.len(), "downloaded png");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/download.rs"]
mod tests;
