//! xorshift64* random number generator
//!
//! 64-bit state, 64-bit output, passes BigCrush. Fast enough that drawing
//! one value per matrix cell stays cheap for pools of a few thousand
//! participants.
//!
//! # Determinism
//!
//! Same seed → same sequence → same pool and matrices.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use saidman_pool_core::RngManager;
///
/// let mut rng = RngManager::new(34252);
/// let u = rng.next_f64();
/// assert!((0.0..1.0).contains(&u));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// xorshift never leaves the all-zero state, so seed 0 is mapped to 1.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Advance the state and return the next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform f64 in `[0.0, 1.0)` built from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next_u64();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Bernoulli trial: true with probability `p`.
    ///
    /// Uses `u <= p`, the threshold convention of the attribute sampler,
    /// so `p = 0.0` still succeeds on an exact zero draw.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.next_f64() <= p
    }

    /// Current internal state. `RngManager::new(state)` resumes the stream.
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
