//! Deterministic RNG for board generation and refills.
//!
//! A simple LCG is enough here: the engine only needs reproducible tile kinds
//! for a given seed (tests and replays), not statistical quality.

use tui_match_types::TileKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG cycle far better than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Random tile kind in `1..=kinds`.
    pub fn next_kind(&mut self, kinds: u8) -> TileKind {
        (self.next_range(kinds.max(1) as u32) + 1) as TileKind
    }
}
