use crate::foundation::core::DayKey;
use crate::weave::hash::{seed_hash, seed_key};
use crate::weave::pattern::{WEAVE_HEIGHT, WEAVE_WIDTH, WeavePattern};
use crate::weave::rhythm::normalize;
use crate::weave::rng::WeaveRng;

const DENSITY_FLOOR: f64 = 0.10;
const DENSITY_CEIL: f64 = 0.85;
const NOISE_AMPLITUDE: f64 = 0.35;

/// Synthesize the weave for `(day, text, timing history)`.
///
/// Pure and deterministic: identical inputs always produce a bit-identical pattern. `text` is
/// used verbatim; callers trim it and skip weaving when it is empty (see [`weave_text`]).
#[tracing::instrument(skip(times), fields(samples = times.len()))]
pub fn build_weave(day: DayKey, text: &str, times: &[f64]) -> WeavePattern {
    let profile = normalize(times);
    let seed = seed_hash(&seed_key(&day.to_string(), text, &profile));
    let mut rng = WeaveRng::new(seed);

    let mut grid = [[false; WEAVE_WIDTH]; WEAVE_HEIGHT];
    for (y, row) in grid.iter_mut().enumerate() {
        // An empty profile borrows one draw from the cell-noise stream per row. Every later
        // noise value shifts with it, and stored seeds depend on that order.
        let t = if profile.is_empty() {
            rng.next_f64()
        } else {
            profile[y % profile.len()]
        };
        let density = (0.15 + t * 0.65).clamp(DENSITY_FLOOR, DENSITY_CEIL);

        for (x, cell) in row.iter_mut().enumerate() {
            let base = if (x + y) % 2 == 0 { 0.52 } else { 0.48 };
            let noise = (rng.next_f64() - 0.5) * NOISE_AMPLITUDE;
            *cell = base + noise < density;
        }
    }

    let text_len = text.encode_utf16().count();
    let pick = (rng.next_f64() * WEAVE_HEIGHT as f64).floor() as usize;
    let stripe_row = (text_len * 3 + pick) % WEAVE_HEIGHT;
    for cell in grid[stripe_row].iter_mut().step_by(3) {
        *cell = true;
    }

    tracing::debug!(seed, stripe_row, "wove pattern");
    WeavePattern::from_generated(seed, grid, stripe_row)
}

/// Weave `raw_text` after trimming; whitespace-only text has no pattern.
///
/// Trimming follows the web whitespace set (see [`trim_web`]) so seeds match stored records.
pub fn weave_text(day: DayKey, raw_text: &str, times: &[f64]) -> Option<WeavePattern> {
    let text = trim_web(raw_text);
    if text.is_empty() {
        return None;
    }
    Some(build_weave(day, text, times))
}

/// `s` without leading and trailing web whitespace.
///
/// Differs from [`str::trim`] in two code points: U+FEFF is stripped, U+0085 is kept.
pub fn trim_web(s: &str) -> &str {
    s.trim_matches(is_web_whitespace)
}

fn is_web_whitespace(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        _ => c.is_whitespace(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/weave/generator.rs"]
mod tests;
