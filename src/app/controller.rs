use crate::app::clock::Clock;
use crate::app::input::{Key, MAX_DRAFT_UNITS, Phase, truncate_utf16, utf16_len};
use crate::app::view::{DayChip, HostContext, ViewModel};
use crate::export::clipboard::Clipboard;
use crate::export::download::{Downloads, ExportOutcome};
use crate::export::png::encode_png;
use crate::foundation::core::DayKey;
use crate::foundation::error::LoomResult;
use crate::host::env::Host;
use crate::render::card::{CardOpts, render_card};
use crate::render::frame::FrameRGBA;
use crate::render::text::TextRasterizer;
use crate::store::day::{DayRecord, DayStore};
use crate::store::kv::KvStore;
use crate::weave::generator::{build_weave, weave_text};
use crate::weave::pattern::WeavePattern;
use crate::weave::rhythm::{TimingHistory, clamp_interval};

/// Haptic pulse length, in milliseconds.
pub const HAPTIC_MS: u32 = 10;
/// Days shown in the strip.
pub const DAY_STRIP_LEN: usize = 7;

/// Everything the controller talks to.
pub struct AppParts {
    /// Persistence backend.
    pub kv: Box<dyn KvStore>,
    /// Embedding host.
    pub host: Box<dyn Host>,
    /// Clipboard for "Copy PNG".
    pub clipboard: Box<dyn Clipboard>,
    /// Download target for the fallback and "Download".
    pub downloads: Downloads,
    /// Source of "today".
    pub clock: Box<dyn Clock>,
    /// Font setup for card labels.
    pub text: TextRasterizer,
    /// Card surface options.
    pub card: CardOpts,
}

/// The Loom session.
///
/// Every operation takes `&mut self`, so weaves and saves never overlap. Persistence, host, and
/// export failures are logged and degraded here; no operation returns an error to the caller.
pub struct LoomApp {
    store: DayStore,
    host: Box<dyn Host>,
    clipboard: Box<dyn Clipboard>,
    downloads: Downloads,
    clock: Box<dyn Clock>,
    text_raster: TextRasterizer,
    card: CardOpts,

    context: HostContext,
    day: DayKey,
    text: String,
    history: TimingHistory,
    last_key_ms: Option<f64>,
    pattern: Option<WeavePattern>,
    copied: bool,
    phase: Phase,
}

impl LoomApp {
    /// Start a session on today's date.
    ///
    /// Restores today's record if there is one. Otherwise weaves the remembered draft, untrimmed,
    /// with an empty rhythm. Then signals the host ready, exactly once per session.
    #[tracing::instrument(skip(parts))]
    pub fn mount(parts: AppParts) -> Self {
        let AppParts {
            kv,
            host,
            clipboard,
            downloads,
            clock,
            text,
            card,
        } = parts;

        let context = match best_effort("host detection", host.is_mini_app()) {
            Some(true) => HostContext::MiniApp,
            _ => HostContext::Web,
        };
        let day = clock.today();

        let mut app = Self {
            store: DayStore::new(kv),
            host,
            clipboard,
            downloads,
            clock,
            text_raster: text,
            card,
            context,
            day,
            text: String::new(),
            history: TimingHistory::new(),
            last_key_ms: None,
            pattern: None,
            copied: false,
            phase: Phase::Idle,
        };

        if let Some(record) = app.load_record(day) {
            app.adopt(record);
            app.phase = if app.pattern.is_some() {
                Phase::Woven
            } else {
                Phase::Idle
            };
        } else {
            let draft = best_effort("load last text", app.store.load_last_text())
                .flatten()
                .unwrap_or_default();
            app.text = truncate_utf16(&draft, MAX_DRAFT_UNITS).to_string();
            // The remembered draft is woven as stored, surrounding whitespace included.
            if !app.text.is_empty() {
                app.pattern = Some(build_weave(day, &app.text, &[]));
                app.save_current();
                app.phase = Phase::Woven;
            }
        }

        best_effort("host ready", app.host.ready());
        tracing::debug!(%day, phase = ?app.phase, backend = app.store.backend_name(), "mounted");
        app
    }

    /// Handle a key press in the draft field at `at_ms` (a monotonic timestamp).
    pub fn key(&mut self, key: Key, at_ms: f64) {
        if let Some(last) = self.last_key_ms
            && key.is_timed()
            && let Some(dt) = clamp_interval(at_ms - last)
        {
            self.history.record(dt);
        }
        self.last_key_ms = Some(at_ms);

        match key {
            Key::Char(c) => {
                if utf16_len(&self.text) + c.len_utf16() <= MAX_DRAFT_UNITS {
                    self.text.push(c);
                }
                self.edited();
            }
            Key::Backspace => {
                self.text.pop();
                self.edited();
            }
            Key::Enter => {
                best_effort("save last text", self.store.save_last_text(&self.text));
                self.commit();
            }
            Key::Other(_) => {}
        }
    }

    /// Replace the draft, as an input event would. Cut to 64 UTF-16 units.
    pub fn set_text(&mut self, text: &str) {
        self.text = truncate_utf16(text, MAX_DRAFT_UNITS).to_string();
        self.edited();
    }

    /// Replace the rhythm with explicit intervals (clamped, newest 120 kept).
    pub fn set_rhythm(&mut self, intervals: &[f64]) {
        self.history.clear();
        for &ms in intervals {
            self.history.record(ms);
        }
    }

    /// Weave the trimmed draft and persist it for the active day.
    ///
    /// Empty text stores a record with no pattern and returns to `Idle`.
    #[tracing::instrument(skip(self), fields(day = %self.day, samples = self.history.len()))]
    pub fn commit(&mut self) -> Option<&WeavePattern> {
        self.copied = false;
        self.pattern = weave_text(self.day, &self.text, self.history.samples());
        self.save_current();
        if self.pattern.is_some() {
            self.phase = Phase::Woven;
            self.pulse();
        } else {
            self.phase = Phase::Idle;
        }
        self.pattern.as_ref()
    }

    /// Switch to `day`, adopting its stored record if one exists.
    #[tracing::instrument(skip(self))]
    pub fn select_day(&mut self, day: DayKey) {
        self.day = day;
        match self.load_record(day) {
            Some(record) => {
                self.adopt(record);
                self.phase = match (&self.pattern, day == self.clock.today()) {
                    (None, _) => Phase::Idle,
                    (Some(_), true) => Phase::Woven,
                    (Some(_), false) => Phase::ViewingPastDay,
                };
            }
            None => {
                self.text.clear();
                self.history.clear();
                self.pattern = None;
                self.phase = Phase::Idle;
            }
        }
        self.copied = false;
        self.pulse();
    }

    /// Start the active day over: drop its rhythm and stored record, then weave the draft again.
    ///
    /// The draft is kept, so non-empty text comes back as a rhythm-free weave. Empty text ends in
    /// `Idle` with a null-pattern record.
    #[tracing::instrument(skip(self), fields(day = %self.day))]
    pub fn reset(&mut self) {
        self.history.clear();
        self.last_key_ms = None;
        self.pattern = None;
        best_effort("remove day record", self.store.remove(self.day));
        self.commit();
    }

    /// Copy the card to the clipboard, falling back to a download.
    pub fn copy_png(&mut self) -> ExportOutcome {
        let png = match self.encode_card() {
            Ok(Some(png)) => png,
            Ok(None) => return ExportOutcome::Skipped,
            Err(e) => return export_failed(e),
        };
        if self.clipboard.is_supported() {
            match self.clipboard.copy_png(&png) {
                Ok(()) => {
                    self.exported();
                    return ExportOutcome::Copied;
                }
                Err(e) => {
                    tracing::warn!(
                        clipboard = self.clipboard.name(),
                        error = %e,
                        "clipboard copy failed; downloading instead"
                    );
                }
            }
        }
        self.save_download(&png)
    }

    /// Write the card to `loom-<day>.png` in the downloads directory.
    pub fn download_png(&mut self) -> ExportOutcome {
        match self.encode_card() {
            Ok(Some(png)) => self.save_download(&png),
            Ok(None) => ExportOutcome::Skipped,
            Err(e) => export_failed(e),
        }
    }

    /// Rasterize the displayed pattern, if any.
    pub fn render(&self) -> LoomResult<Option<FrameRGBA>> {
        self.pattern
            .as_ref()
            .map(|p| render_card(p, self.day, &self.card, &self.text_raster))
            .transpose()
    }

    /// Stored record for `day`, without switching to it. Unreadable records count as absent.
    pub fn peek_day(&self, day: DayKey) -> Option<DayRecord> {
        self.load_record(day)
    }

    /// Current screen contents.
    pub fn view(&self) -> ViewModel {
        let days = self
            .clock
            .today()
            .last_days(DAY_STRIP_LEN)
            .into_iter()
            .map(|day| DayChip {
                day,
                label: day.short_label(),
                active: day == self.day,
            })
            .collect();
        ViewModel {
            context: self.context,
            phase: self.phase,
            day: self.day,
            input: self.text.clone(),
            signature: self.pattern.as_ref().map(WeavePattern::signature),
            copy_label: if self.copied { "Copied" } else { "Copy PNG" },
            days,
            tip: if self.pattern.is_some() {
                "Tip: change your rhythm, not your words."
            } else {
                "Start typing to create your first weave."
            },
        }
    }

    /// Active day.
    pub fn day(&self) -> DayKey {
        self.day
    }

    /// Session phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Draft text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// In-memory rhythm samples, oldest first.
    pub fn timings(&self) -> &[f64] {
        self.history.samples()
    }

    /// Displayed pattern.
    pub fn pattern(&self) -> Option<&WeavePattern> {
        self.pattern.as_ref()
    }

    /// Whether the last export succeeded and nothing changed since.
    pub fn copied(&self) -> bool {
        self.copied
    }

    /// Detected host context.
    pub fn context(&self) -> HostContext {
        self.context
    }

    fn edited(&mut self) {
        self.copied = false;
        self.phase = Phase::Composing;
    }

    fn adopt(&mut self, record: DayRecord) {
        self.text = truncate_utf16(&record.text, MAX_DRAFT_UNITS).to_string();
        self.history = TimingHistory::from_samples(record.times);
        self.pattern = record.pattern;
    }

    fn load_record(&self, day: DayKey) -> Option<DayRecord> {
        best_effort("load day record", self.store.load(day)).flatten()
    }

    fn save_current(&self) {
        let record = DayRecord {
            text: self.text.clone(),
            times: self.history.samples().to_vec(),
            pattern: self.pattern.clone(),
        };
        best_effort("save day record", self.store.save(self.day, &record));
    }

    fn encode_card(&self) -> LoomResult<Option<Vec<u8>>> {
        match self.render()? {
            Some(frame) => encode_png(&frame).map(Some),
            None => Ok(None),
        }
    }

    fn save_download(&mut self, png: &[u8]) -> ExportOutcome {
        match self.downloads.save(self.day, png) {
            Ok(path) => {
                self.exported();
                ExportOutcome::Downloaded(path)
            }
            Err(e) => export_failed(e),
        }
    }

    fn exported(&mut self) {
        self.copied = true;
        self.pulse();
    }

    fn pulse(&self) {
        best_effort("haptics", self.host.vibrate(HAPTIC_MS));
    }
}

/// Log a failed best-effort call and turn it into `None`.
fn best_effort<T>(what: &str, result: LoomResult<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(error = %e, "{what} failed; continuing");
            None
        }
    }
}

fn export_failed(e: crate::foundation::error::LoomError) -> ExportOutcome {
    tracing::warn!(error = %e, "export failed");
    ExportOutcome::Failed(e.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/app/controller.rs"]
mod tests;
