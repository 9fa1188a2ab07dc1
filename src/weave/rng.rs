/// Deterministic xorshift32 stream of `f64` values in `[0, 1)`.
///
/// Restartable: two generators built from the same seed yield identical sequences. The stream
/// is not suitable for anything security-related.
///
/// A seed of `0` is accepted as-is and yields `0.0` forever (xorshift has no way out of the
/// all-zero state). Seeds derived from real weave keys are practically never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaveRng {
    state: u32,
}

impl WeaveRng {
    /// Create a generator positioned at the start of `seed`'s sequence.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance and return the raw 32-bit state.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Advance and return a value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

impl Iterator for WeaveRng {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/weave/rng.rs"]
mod tests;
