use serde::{Deserialize, Serialize};

use crate::foundation::core::DayKey;
use crate::foundation::error::{LoomError, LoomResult};
use crate::store::kv::KvStore;
use crate::weave::pattern::WeavePattern;

/// Namespace prefix for per-day records.
pub const DAY_KEY_PREFIX: &str = "loom:day:";
/// Key of the globally remembered draft text.
pub const LAST_TEXT_KEY: &str = "loom:lastText";
/// Timing samples written per record; older samples stay in memory only.
pub const PERSISTED_TIMES: usize = 48;

/// Everything Loom remembers about one calendar day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Draft text at the time of the last weave (may be empty or whitespace).
    #[serde(default)]
    pub text: String,
    /// Inter-keystroke intervals in milliseconds, oldest first.
    #[serde(default)]
    pub times: Vec<f64>,
    /// Woven pattern, or `None` when the text was empty.
    #[serde(default)]
    pub pattern: Option<WeavePattern>,
}

/// Day-keyed record persistence over an injected [`KvStore`].
///
/// Every call reports failures. The controller applies the best-effort policy; the store never
/// hides an error on its own.
pub struct DayStore {
    kv: Box<dyn KvStore>,
}

impl DayStore {
    /// Wrap a key-value backend.
    pub fn new(kv: Box<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Storage key of `day`'s record.
    pub fn record_key(day: DayKey) -> String {
        format!("{DAY_KEY_PREFIX}{day}")
    }

    /// Backend name, for logs.
    pub fn backend_name(&self) -> &str {
        self.kv.name()
    }

    /// Persist `record` for `day`, keeping only the newest [`PERSISTED_TIMES`] samples.
    #[tracing::instrument(skip(self, record), fields(backend = self.kv.name()))]
    pub fn save(&self, day: DayKey, record: &DayRecord) -> LoomResult<()> {
        let start = record.times.len().saturating_sub(PERSISTED_TIMES);
        let capped = DayRecord {
            text: record.text.clone(),
            times: record.times[start..].to_vec(),
            pattern: record.pattern.clone(),
        };
        let json = serde_json::to_string(&capped)?;
        self.kv.set(&Self::record_key(day), &json)
    }

    /// Load `day`'s record. A missing key is `Ok(None)`; an unreadable or invalid value is an
    /// error.
    #[tracing::instrument(skip(self), fields(backend = self.kv.name()))]
    pub fn load(&self, day: DayKey) -> LoomResult<Option<DayRecord>> {
        let Some(raw) = self.kv.get(&Self::record_key(day))? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| LoomError::storage(format!("corrupt record for {day}: {e}")))
    }

    /// Delete `day`'s record entirely.
    #[tracing::instrument(skip(self), fields(backend = self.kv.name()))]
    pub fn remove(&self, day: DayKey) -> LoomResult<()> {
        self.kv.remove(&Self::record_key(day))
    }

    /// Remember the current draft across days.
    pub fn save_last_text(&self, text: &str) -> LoomResult<()> {
        self.kv.set(LAST_TEXT_KEY, text)
    }

    /// Last remembered draft, if any.
    pub fn load_last_text(&self) -> LoomResult<Option<String>> {
        self.kv.get(LAST_TEXT_KEY)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/day.rs"]
mod tests;
