//! Runtime configuration: defaults, then `LOOM_*` environment variables, then explicit overrides.

use std::path::PathBuf;

use crate::export::clipboard::{Clipboard, CommandClipboard, NoClipboard};
use crate::export::download::Downloads;
use crate::foundation::error::{LoomError, LoomResult};
use crate::render::card::CardOpts;
use crate::store::kv::FileKv;

/// Store file path.
pub const ENV_STORE: &str = "LOOM_STORE";
/// Downloads directory.
pub const ENV_DOWNLOADS: &str = "LOOM_DOWNLOADS";
/// Device pixel ratio.
pub const ENV_DPR: &str = "LOOM_DPR";
/// Container width in CSS px.
pub const ENV_WIDTH: &str = "LOOM_WIDTH";
/// Clipboard command line.
pub const ENV_CLIPBOARD_CMD: &str = "LOOM_CLIPBOARD_CMD";
/// Extra font directories, separated like `PATH`.
pub const ENV_FONT_DIR: &str = "LOOM_FONT_DIR";

const MAX_DPR: f64 = 8.0;

/// Resolved settings for one Loom session.
#[derive(Clone, Debug, PartialEq)]
pub struct LoomConfig {
    /// Key-value store file.
    pub store_path: PathBuf,
    /// Where `loom-<day>.png` files go.
    pub downloads_dir: PathBuf,
    /// Physical pixels per CSS px.
    pub device_pixel_ratio: f64,
    /// Width of the container hosting the card, in CSS px.
    pub container_width: f64,
    /// Clipboard command; `None` means no clipboard.
    pub clipboard_cmd: Option<String>,
    /// Font directories searched in addition to system fonts.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for LoomConfig {
    fn default() -> Self {
        Self {
            store_path: FileKv::default_path(),
            downloads_dir: Downloads::default_dir(),
            device_pixel_ratio: 1.0,
            container_width: CardOpts::default().container_width,
            clipboard_cmd: None,
            font_dirs: Vec::new(),
        }
    }
}

impl LoomConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> LoomResult<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Defaults overlaid with values from `lookup`. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LoomResult<Self> {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(v) = get(ENV_STORE) {
            cfg.store_path = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_DOWNLOADS) {
            cfg.downloads_dir = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_DPR) {
            cfg.device_pixel_ratio = parse_f64(ENV_DPR, &v)?;
        }
        if let Some(v) = get(ENV_WIDTH) {
            cfg.container_width = parse_f64(ENV_WIDTH, &v)?;
        }
        if let Some(v) = get(ENV_CLIPBOARD_CMD) {
            cfg.clipboard_cmd = Some(v);
        }
        if let Some(v) = get(ENV_FONT_DIR) {
            cfg.font_dirs = std::env::split_paths(&v).collect();
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Check ranges. The card must fit at least one device pixel per grid cell.
    pub fn validate(&self) -> LoomResult<()> {
        let dpr = self.device_pixel_ratio;
        if !dpr.is_finite() || dpr <= 0.0 || dpr > MAX_DPR {
            return Err(LoomError::validation(format!(
                "device pixel ratio must be in (0, {MAX_DPR}], got {dpr}"
            )));
        }
        let min_width = 24.0 + 36.0 + 28.0;
        let w = self.container_width;
        if !w.is_finite() || w < min_width {
            return Err(LoomError::validation(format!(
                "container width must be at least {min_width} px, got {w}"
            )));
        }
        if let Some(cmd) = &self.clipboard_cmd {
            CommandClipboard::from_command_line(cmd)?;
        }
        Ok(())
    }

    /// Card surface options.
    pub fn card_opts(&self) -> CardOpts {
        CardOpts {
            container_width: self.container_width,
            device_pixel_ratio: self.device_pixel_ratio,
        }
    }

    /// Clipboard backend for this configuration.
    pub fn clipboard(&self) -> LoomResult<Box<dyn Clipboard>> {
        Ok(match &self.clipboard_cmd {
            Some(cmd) => Box::new(CommandClipboard::from_command_line(cmd)?),
            None => Box::new(NoClipboard),
        })
    }
}

fn parse_f64(name: &str, raw: &str) -> LoomResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| LoomError::validation(format!("{name}='{raw}': {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
