use serde::{Deserialize, Serialize};

use crate::foundation::error::{LoomError, LoomResult};
use crate::foundation::math::Fnv1a64;

/// Columns in every weave.
pub const WEAVE_WIDTH: usize = 28;
/// Rows in every weave.
pub const WEAVE_HEIGHT: usize = 18;

/// One day's generated cloth: a fixed 18×28 binary grid plus a highlighted stripe row.
///
/// Persisted as `{"seed", "grid", "W", "H", "stripeRow"}` with `0`/`1` cells. Decoding validates
/// the shape, so a `WeavePattern` value always has exactly [`WEAVE_HEIGHT`] rows of
/// [`WEAVE_WIDTH`] cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PatternWire", into = "PatternWire")]
pub struct WeavePattern {
    seed: u32,
    grid: [[bool; WEAVE_WIDTH]; WEAVE_HEIGHT],
    stripe_row: usize,
}

impl WeavePattern {
    pub(crate) fn from_generated(
        seed: u32,
        grid: [[bool; WEAVE_WIDTH]; WEAVE_HEIGHT],
        stripe_row: usize,
    ) -> Self {
        debug_assert!(stripe_row < WEAVE_HEIGHT);
        Self {
            seed,
            grid,
            stripe_row,
        }
    }

    fn from_parts(
        seed: u32,
        grid: [[bool; WEAVE_WIDTH]; WEAVE_HEIGHT],
        stripe_row: usize,
    ) -> LoomResult<Self> {
        if stripe_row >= WEAVE_HEIGHT {
            return Err(LoomError::validation(format!(
                "stripe row {stripe_row} is outside 0..{WEAVE_HEIGHT}"
            )));
        }
        Ok(Self {
            seed,
            grid,
            stripe_row,
        })
    }

    /// Seed that produced this pattern.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Highlighted row index, in `0..WEAVE_HEIGHT`.
    pub fn stripe_row(&self) -> usize {
        self.stripe_row
    }

    /// Row-major cells, `true` meaning "on".
    pub fn rows(&self) -> &[[bool; WEAVE_WIDTH]; WEAVE_HEIGHT] {
        &self.grid
    }

    /// Whether the cell at column `x`, row `y` is on. Out-of-range coordinates are off.
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Number of lit cells.
    pub fn on_cells(&self) -> usize {
        self.grid.iter().flatten().filter(|c| **c).count()
    }

    /// Seed as 8 uppercase, zero-padded hex digits (the card's `SIG` line).
    pub fn signature(&self) -> String {
        format!("{:08X}", self.seed)
    }

    /// FNV-1a 64 over the cells in row-major order, one byte (`0`/`1`) per cell.
    pub fn checksum(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        for cell in self.grid.iter().flatten() {
            h.write_u8(u8::from(*cell));
        }
        h.finish()
    }

    /// Text rendering, one line per row: `#` for on, `.` for off.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(WEAVE_HEIGHT * (WEAVE_WIDTH + 1));
        for row in &self.grid {
            out.extend(row.iter().map(|&c| if c { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

#[derive(Serialize, Deserialize)]
struct PatternWire {
    seed: u32,
    grid: Vec<Vec<u8>>,
    #[serde(rename = "W")]
    width: usize,
    #[serde(rename = "H")]
    height: usize,
    #[serde(rename = "stripeRow", default)]
    stripe_row: usize,
}

impl TryFrom<PatternWire> for WeavePattern {
    type Error = LoomError;

    fn try_from(w: PatternWire) -> LoomResult<Self> {
        if w.width != WEAVE_WIDTH || w.height != WEAVE_HEIGHT {
            return Err(LoomError::validation(format!(
                "pattern is {}x{}, expected {WEAVE_WIDTH}x{WEAVE_HEIGHT}",
                w.width, w.height
            )));
        }
        if w.grid.len() != WEAVE_HEIGHT {
            return Err(LoomError::validation(format!(
                "pattern grid has {} rows, expected {WEAVE_HEIGHT}",
                w.grid.len()
            )));
        }

        let mut grid = [[false; WEAVE_WIDTH]; WEAVE_HEIGHT];
        for (y, row) in w.grid.iter().enumerate() {
            if row.len() != WEAVE_WIDTH {
                return Err(LoomError::validation(format!(
                    "pattern row {y} has {} cells, expected {WEAVE_WIDTH}",
                    row.len()
                )));
            }
            for (x, &cell) in row.iter().enumerate() {
                grid[y][x] = match cell {
                    0 => false,
                    1 => true,
                    other => {
                        return Err(LoomError::validation(format!(
                            "pattern cell ({x},{y}) is {other}, expected 0 or 1"
                        )));
                    }
                };
            }
        }

        Self::from_parts(w.seed, grid, w.stripe_row)
    }
}

impl From<WeavePattern> for PatternWire {
    fn from(p: WeavePattern) -> Self {
        Self {
            seed: p.seed,
            grid: p
                .grid
                .iter()
                .map(|row| row.iter().map(|&c| u8::from(c)).collect())
                .collect(),
            width: WEAVE_WIDTH,
            height: WEAVE_HEIGHT,
            stripe_row: p.stripe_row,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/weave/pattern.rs"]
mod tests;
