//! Keystroke rhythm capture and normalization.

/// Shortest inter-keystroke interval recorded, in milliseconds.
pub const MIN_INTERVAL_MS: f64 = 12.0;
/// Longest inter-keystroke interval recorded, in milliseconds.
pub const MAX_INTERVAL_MS: f64 = 900.0;
/// Samples kept in memory for the active day.
pub const HISTORY_CAPACITY: usize = 120;
/// Samples that feed a weave's rhythm profile.
pub const PROFILE_WINDOW: usize = 24;

/// Clamp a raw interval into the recordable range.
///
/// Returns `None` for non-finite input, which is never recorded.
pub fn clamp_interval(ms: f64) -> Option<f64> {
    ms.is_finite()
        .then(|| ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS))
}

/// Bounded, ordered history of inter-keystroke intervals (oldest first).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimingHistory {
    samples: Vec<f64>,
}

impl TimingHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt previously persisted samples, keeping only the newest [`HISTORY_CAPACITY`].
    pub fn from_samples(samples: Vec<f64>) -> Self {
        let mut out = Self { samples };
        out.evict();
        out
    }

    /// Record one interval (clamped). Non-finite intervals are dropped.
    pub fn record(&mut self, interval_ms: f64) {
        let Some(v) = clamp_interval(interval_ms) else {
            return;
        };
        self.samples.push(v);
        self.evict();
    }

    /// All retained samples, oldest first.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// The newest `n` samples (or fewer).
    pub fn tail(&self, n: usize) -> &[f64] {
        let start = self.samples.len().saturating_sub(n);
        &self.samples[start..]
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Forget every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    fn evict(&mut self) {
        if self.samples.len() > HISTORY_CAPACITY {
            let excess = self.samples.len() - HISTORY_CAPACITY;
            self.samples.drain(..excess);
        }
    }
}

/// Min-max scale the last [`PROFILE_WINDOW`] samples into `[0, 1]`.
///
/// The span is floored at 1 so equal samples normalize to zeros instead of dividing by zero.
pub fn normalize(samples: &[f64]) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }
    let window = &samples[samples.len().saturating_sub(PROFILE_WINDOW)..];
    let min = window.iter().copied().fold(f64::INFINITY, f64::min);
    let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(1.0);
    window.iter().map(|v| (v - min) / span).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/weave/rhythm.rs"]
mod tests;
