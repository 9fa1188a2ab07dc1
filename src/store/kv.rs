//! Key-value persistence port.
//!
//! The day store only needs string get/set/remove. Implementations report every failure as a
//! [`LoomError::Storage`]; callers decide whether to degrade.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::foundation::error::{LoomError, LoomResult};

/// String key-value store addressed by namespaced keys.
pub trait KvStore {
    /// Human-readable backend name, for logs.
    fn name(&self) -> &str;

    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> LoomResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> LoomResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> LoomResult<()>;
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: BTreeMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory store. Clones share the same map, so a test can keep a handle for inspection.
#[derive(Clone, Debug, Default)]
pub struct MemoryKv {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryKv {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent reads fail (an unavailable backend).
    pub fn set_fail_reads(&self, fail: bool) {
        self.lock_state().fail_reads = fail;
    }

    /// Make subsequent writes and removals fail (a full or read-only backend).
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock_state().fail_writes = fail;
    }

    /// Snapshot of every stored entry.
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.lock_state().entries.clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A poisoned map is still a valid map.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KvStore for MemoryKv {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> LoomResult<Option<String>> {
        let state = self.lock_state();
        if state.fail_reads {
            return Err(LoomError::storage("memory store is unavailable"));
        }
        Ok(state.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> LoomResult<()> {
        let mut state = self.lock_state();
        if state.fail_writes {
            return Err(LoomError::storage("memory store quota exceeded"));
        }
        state.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> LoomResult<()> {
        let mut state = self.lock_state();
        if state.fail_writes {
            return Err(LoomError::storage("memory store is read-only"));
        }
        state.entries.remove(key);
        Ok(())
    }
}

/// Single-file JSON store: one object mapping keys to string values.
///
/// Every write rewrites the whole document through `<path>.tmp` and an atomic rename, so a crash
/// mid-write leaves the previous document intact.
#[derive(Clone, Debug)]
pub struct FileKv {
    path: PathBuf,
}

impl FileKv {
    /// Store backed by `path`. The file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Default location: `$XDG_STATE_HOME/loom/store.json`, then `~/.local/state/loom/store.json`,
    /// then `./loom-store.json`.
    pub fn default_path() -> PathBuf {
        if let Some(state_home) = std::env::var_os("XDG_STATE_HOME") {
            return PathBuf::from(state_home).join("loom").join("store.json");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("loom")
                .join("store.json");
        }
        PathBuf::from("loom-store.json")
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }

    fn load_all(&self) -> LoomResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let file = File::open(&self.path).map_err(|e| {
            LoomError::storage(format!("open store '{}': {e}", self.path.display()))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            LoomError::storage(format!("parse store '{}': {e}", self.path.display()))
        })
    }

    fn save_all(&self, entries: &BTreeMap<String, String>) -> LoomResult<()> {
        let io_err =
            |what: &str, e: std::io::Error| LoomError::storage(format!("{what} store: {e}"));

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| io_err("create dir for", e))?;
        }

        let tmp_path = self.temp_path();
        {
            let file = File::create(&tmp_path).map_err(|e| io_err("create temp", e))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, entries)
                .map_err(|e| LoomError::storage(format!("serialize store: {e}")))?;
            writer.flush().map_err(|e| io_err("flush", e))?;
            writer.get_ref().sync_all().map_err(|e| io_err("sync", e))?;
        }
        fs::rename(&tmp_path, &self.path).map_err(|e| io_err("replace", e))?;

        tracing::debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "saved store"
        );
        Ok(())
    }
}

impl KvStore for FileKv {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> LoomResult<Option<String>> {
        Ok(self.load_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> LoomResult<()> {
        let mut entries = self.load_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.save_all(&entries)
    }

    fn remove(&self, key: &str) -> LoomResult<()> {
        let mut entries = self.load_all()?;
        if entries.remove(key).is_some() {
            self.save_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/kv.rs"]
mod tests;
