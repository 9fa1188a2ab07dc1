//! String-to-seed reduction.
//!
//! Seeds are computed over UTF-16 code units with a `*31` polynomial in wrapping 32-bit
//! arithmetic. Keeping that exact reduction (and the number formatting used to build the seed
//! key) means records written by earlier Loom builds re-weave to the same cloth.

/// Prefix of every weave seed key. Bump the version segment to change all seeds at once.
pub const SEED_KEY_PREFIX: &str = "loom:v1:";

/// Reduce `s` to a 32-bit seed: `hash = hash * 31 + unit (mod 2^32)` over UTF-16 units.
pub fn seed_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

/// Composite seed key for a weave: `loom:v1:<day>:<text>:<profile joined by ','>`.
pub fn seed_key(day_key: &str, text: &str, profile: &[f64]) -> String {
    let joined = profile
        .iter()
        .map(|v| format_number(*v))
        .collect::<Vec<_>>()
        .join(",");
    format!("{SEED_KEY_PREFIX}{day_key}:{text}:{joined}")
}

/// Format a number the way seed keys have always spelled them.
///
/// Shortest round-trip decimal, `0` for both zeros, and exponent form (`1e-7`, `1e+21`) outside
/// `[1e-6, 1e21)`.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let abs = v.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{v}");
    }

    let exp = format!("{v:e}");
    match exp.split_once('e') {
        Some((mantissa, e)) if !e.starts_with('-') => format!("{mantissa}e+{e}"),
        _ => exp,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/weave/hash.rs"]
mod tests;
