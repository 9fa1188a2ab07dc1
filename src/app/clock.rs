use crate::foundation::core::DayKey;

/// Source of "today".
pub trait Clock {
    /// The current calendar day.
    fn today(&self) -> DayKey;
}

/// Local wall-clock date.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DayKey {
        DayKey::today_local()
    }
}

/// A clock pinned to one day.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DayKey);

impl Clock for FixedClock {
    fn today(&self) -> DayKey {
        self.0
    }
}
