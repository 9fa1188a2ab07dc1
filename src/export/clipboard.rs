use std::io::Write as _;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use crate::foundation::error::{LoomError, LoomResult};

/// Destination for a copied PNG.
pub trait Clipboard {
    /// Backend name, for logs.
    fn name(&self) -> &str;

    /// Whether this environment can take image data at all.
    fn is_supported(&self) -> bool;

    /// Place `png` on the clipboard.
    fn copy_png(&self, png: &[u8]) -> LoomResult<()>;
}

/// No clipboard. Every export falls through to a download.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn name(&self) -> &str {
        "none"
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn copy_png(&self, _png: &[u8]) -> LoomResult<()> {
        Err(LoomError::export("clipboard is not supported here"))
    }
}

/// Pipes the PNG into an external command such as `wl-copy --type image/png` or
/// `xclip -selection clipboard -t image/png`.
#[derive(Clone, Debug)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Parse a whitespace-separated command line.
    pub fn from_command_line(line: &str) -> LoomResult<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| LoomError::validation("clipboard command must be non-empty"))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Program that receives the PNG on stdin.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Clipboard for CommandClipboard {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_supported(&self) -> bool {
        true
    }

    #[tracing::instrument(skip(self, png), fields(program = %self.program, bytes = png.len()))]
    fn copy_png(&self, png: &[u8]) -> LoomResult<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                LoomError::export(format!("failed to spawn '{}': {e}", self.program))
            })?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| LoomError::export("failed to open clipboard stdin"))?;
            stdin.write_all(png).map_err(|e| {
                LoomError::export(format!("failed to write png to '{}': {e}", self.program))
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            LoomError::export(format!("failed to wait for '{}': {e}", self.program))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LoomError::export(format!(
                "'{}' exited with status {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryClipboardState {
    contents: Option<Vec<u8>>,
    fail: bool,
}

/// In-process clipboard. Clones share contents, so tests can inspect what was copied.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    state: Arc<Mutex<MemoryClipboardState>>,
}

impl MemoryClipboard {
    /// An empty, working clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent copies fail (permission denied).
    pub fn set_fail(&self, fail: bool) {
        self.lock_state().fail = fail;
    }

    /// Bytes of the last successful copy.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.lock_state().contents.clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, MemoryClipboardState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clipboard for MemoryClipboard {
    fn name(&self) -> &str {
        "memory"
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn copy_png(&self, png: &[u8]) -> LoomResult<()> {
        let mut state = self.lock_state();
        if state.fail {
            return Err(LoomError::export("clipboard write was denied"));
        }
        state.contents = Some(png.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/clipboard.rs"]
mod tests;
