//! Random source trait and the default xorshift generator
//!
//! The divergence meter needs cheap, non-cryptographic randomness. The trait
//! keeps the meter deterministic under test (scripted values) while the
//! firmware seeds [`XorShift32`] from a floating ADC pin at boot.

/// Source of uniform random values.
pub trait RandomSource {
    /// Next raw 32-bit value
    fn next_u32(&mut self) -> u32;

    /// Uniform draw in `[0, bound)`
    ///
    /// Modulo bias is irrelevant at the bounds used here (<= 300000).
    fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

/// Xorshift32 pseudo-random generator (Marsaglia).
///
/// Period 2^32-1; state must never be zero.
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator from a seed. A zero seed is remapped since the
    /// xorshift state must be non-zero.
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x6b8b_4567 } else { seed },
        }
    }
}

impl RandomSource for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}
