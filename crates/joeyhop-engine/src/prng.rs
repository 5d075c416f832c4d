//! Deterministic seeded random streams for level layout.
//!
//! A [`SeededRandom`] is a Lehmer-style generator (multiplier 48271) mixed with
//! a session-wide [`BaseSeed`]. Every stream is independent: two streams built
//! from the same base seed and local seed yield identical sequences, which is
//! what lets the level generator and the tile map re-derive a row's layout
//! from nothing but its row index.
//!
//! Arithmetic is 32-bit wrapping, and the output keeps the low 31 bits of the
//! state divided by `2^31`, so values lie in `[0, 1)`.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Multiplier of the recurrence.
const MULTIPLIER: i32 = 48_271;

/// Draws thrown away before a stream is handed out.
const WARM_UP_DRAWS: usize = 11;

/// `2^31`, the output normaliser.
const TWO_POW_31: f64 = 2_147_483_648.0;

// ---------------------------------------------------------------------------
// BaseSeed
// ---------------------------------------------------------------------------

/// Session-wide seed mixed into every stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseSeed(pub u64);

impl BaseSeed {
    /// Capture the current wall-clock time in milliseconds.
    pub fn from_clock() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    /// Start an independent stream keyed by `local_seed`.
    pub fn stream(self, local_seed: i64) -> SeededRandom {
        SeededRandom::new(self, local_seed)
    }
}

// ---------------------------------------------------------------------------
// SeededRandom
// ---------------------------------------------------------------------------

/// One reproducible stream of values in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: i64,
    base: i64,
}

impl SeededRandom {
    /// Build a stream and discard its warm-up draws.
    pub fn new(base: BaseSeed, local_seed: i64) -> Self {
        let mut random = Self {
            state: local_seed,
            base: base.0 as i64,
        };
        for _ in 0..WARM_UP_DRAWS {
            random.next_unit();
        }
        random
    }

    /// Next value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        // Truncating to i32 is a modulo-2^32 reduction, same as the sum
        // being coerced to a signed 32-bit integer.
        let mixed = self.state.wrapping_add(self.base) as i32;
        let next = MULTIPLIER.wrapping_mul(mixed);
        self.state = next as i64;
        (next & 0x7fff_ffff) as f64 / TWO_POW_31
    }

    /// Next value affinely mapped into `[from, to)`.
    pub fn range(&mut self, from: f64, to: f64) -> f64 {
        from + self.next_unit() * (to - from)
    }
}

impl Iterator for SeededRandom {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_unit())
    }
}
