//! Deterministic random draws
//!
//! Every draw made while building a pool (attribute sampling and the
//! per-cell crossmatch draws of the compatibility matrix) goes through a
//! single [`UniformSource`]. Seeding that source fixes the whole run.

mod xorshift;

pub use xorshift::RngManager;

/// A source of uniform samples in `[0.0, 1.0)`.
///
/// Implemented by [`RngManager`]; tests implement it to script draws.
pub trait UniformSource {
    /// Next uniform sample in `[0.0, 1.0)`.
    fn next_uniform(&mut self) -> f64;
}

impl UniformSource for RngManager {
    fn next_uniform(&mut self) -> f64 {
        self.next_f64()
    }
}
