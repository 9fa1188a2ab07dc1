use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};

use crate::foundation::error::{LoomError, LoomResult};

/// Calendar-day identifier, formatted as `YYYY-MM-DD`.
///
/// This is the primary key for persisted day records and is mixed into every weave seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Wrap a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year/month/day components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> LoomResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| LoomError::validation(format!("invalid date {year}-{month}-{day}")))
    }

    /// Today's key in the local timezone.
    pub fn today_local() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    /// Underlying date.
    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// The key `n` calendar days earlier (saturating at the earliest representable date).
    pub fn days_before(self, n: u64) -> Self {
        Self(self.0.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN))
    }

    /// `n` keys ending at `self`, newest first.
    pub fn last_days(self, n: usize) -> Vec<DayKey> {
        (0..n as u64).map(|i| self.days_before(i)).collect()
    }

    /// Short `MM-DD` label used by the day strip.
    pub fn short_label(self) -> String {
        format!("{:02}-{:02}", self.0.month(), self.0.day())
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for DayKey {
    type Err = LoomError;

    fn from_str(s: &str) -> LoomResult<Self> {
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(LoomError::validation(format!(
                "day key '{s}' is not in YYYY-MM-DD form"
            )));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| LoomError::validation(format!("day key '{s}': {e}")))
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGB components and a CSS-style `0.0..=1.0` alpha.
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b, a }
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
