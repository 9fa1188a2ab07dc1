//! Loom weaves one small textile a day out of how you type.
//!
//! The text you enter and the rhythm of your keystrokes seed a deterministic 18×28 grid. Each
//! calendar day keeps one record, and the card can be exported as a PNG.
//!
//! - [`build_weave`] is the pure generator: same day, text, and rhythm give the same cloth
//! - [`DayStore`] persists one [`DayRecord`] per day over any [`KvStore`]
//! - [`render_card`] rasterizes a [`WeavePattern`] on the CPU
//! - [`LoomApp`] is the session controller that ties input, storage, and export together
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod app;
mod export;
mod foundation;
mod host;
mod render;
mod store;
mod weave;

/// Runtime configuration.
pub mod config;

pub use crate::foundation::core::{DayKey, Rgba8};
pub use crate::foundation::error::{LoomError, LoomResult};

pub use crate::weave::generator::{build_weave, trim_web, weave_text};
pub use crate::weave::hash::{SEED_KEY_PREFIX, format_number, seed_hash, seed_key};
pub use crate::weave::pattern::{WEAVE_HEIGHT, WEAVE_WIDTH, WeavePattern};
pub use crate::weave::rhythm::{
    HISTORY_CAPACITY, MAX_INTERVAL_MS, MIN_INTERVAL_MS, PROFILE_WINDOW, TimingHistory,
    clamp_interval, normalize,
};
pub use crate::weave::rng::WeaveRng;

pub use crate::store::day::{DAY_KEY_PREFIX, DayRecord, DayStore, LAST_TEXT_KEY, PERSISTED_TIMES};
pub use crate::store::kv::{FileKv, KvStore, MemoryKv};

pub use crate::render::card::{CARD_HEIGHT, CARD_MAX_WIDTH, CardOpts, render_card};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::text::TextRasterizer;

pub use crate::export::clipboard::{Clipboard, CommandClipboard, MemoryClipboard, NoClipboard};
pub use crate::export::download::{Downloads, ExportOutcome};
pub use crate::export::png::{PNG_SIGNATURE, encode_png};

pub use crate::host::env::{EnvHost, HOST_ENV_VAR, Host, RecordingHost};

pub use crate::app::clock::{Clock, FixedClock, SystemClock};
pub use crate::app::controller::{AppParts, DAY_STRIP_LEN, HAPTIC_MS, LoomApp};
pub use crate::app::input::{Key, MAX_DRAFT_UNITS, Phase, truncate_utf16, utf16_len};
pub use crate::app::view::{DayChip, HostContext, ViewModel};

pub use crate::config::LoomConfig;
