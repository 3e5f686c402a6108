//! RNG module - seeded dice for piece shapes and colors
//!
//! A simple LCG keeps every session reproducible from its seed, which is what
//! the tests rely on. Rolls are 1-based to match how shapes and colors are
//! numbered.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    seed: u32,
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { seed, state }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits cycle with a short period; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Roll a die with `sides` faces, returning 1..=sides
    pub fn roll(&mut self, sides: u32) -> u32 {
        self.next_range(sides) + 1
    }
}
