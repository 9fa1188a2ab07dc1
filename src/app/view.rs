use std::fmt;

use crate::app::input::Phase;
use crate::foundation::core::DayKey;

/// Where Loom is embedded. Only labels depend on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostContext {
    /// Embedded in a social client as a mini app.
    MiniApp,
    /// Plain web (or terminal) preview.
    Web,
}

impl HostContext {
    /// Brand-line label.
    pub fn label(self) -> &'static str {
        match self {
            Self::MiniApp => "Mini App",
            Self::Web => "Web",
        }
    }

    /// Footer pill label.
    pub fn footer(self) -> &'static str {
        match self {
            Self::MiniApp => "Farcaster/Base",
            Self::Web => "Web preview",
        }
    }
}

/// One button in the "Last 7 days" strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayChip {
    /// Day this chip selects.
    pub day: DayKey,
    /// `MM-DD` label.
    pub label: String,
    /// Whether this is the active day.
    pub active: bool,
}

/// Everything the screen shows, derived from controller state.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel {
    /// Host context.
    pub context: HostContext,
    /// Current session phase.
    pub phase: Phase,
    /// Active day.
    pub day: DayKey,
    /// Draft text in the input field.
    pub input: String,
    /// `SIG` hex of the displayed pattern, if any.
    pub signature: Option<String>,
    /// Copy button label.
    pub copy_label: &'static str,
    /// Day strip, today first.
    pub days: Vec<DayChip>,
    /// Hint under the strip.
    pub tip: &'static str,
}

impl ViewModel {
    /// Brand line, e.g. `Web • typing → textile`.
    pub fn brand_line(&self) -> String {
        format!("{} • typing → textile", self.context.label())
    }
}

impl fmt::Display for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LOOM  {}", self.brand_line())?;
        writeln!(f, "day     {}  ({:?})", self.day, self.phase)?;
        writeln!(f, "input   [{}]", self.input)?;
        match &self.signature {
            Some(sig) => writeln!(f, "card    LOOM • {}  SIG {sig}", self.day)?,
            None => writeln!(f, "card    (empty)")?,
        }
        writeln!(f, "actions [{}] [Download]", self.copy_label)?;
        write!(f, "days   ")?;
        for chip in &self.days {
            if chip.active {
                write!(f, " [{}]", chip.label)?;
            } else {
                write!(f, "  {} ", chip.label)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "{}", self.tip)?;
        write!(f, "{} • Saved locally.", self.context.footer())
    }
}
