//! Saidman Pool Generator - Rust Core
//!
//! Synthesizes kidney-exchange donor pools following the Saidman model:
//! patient-donor pairs and altruist (non-directed) donors with sampled
//! clinical attributes, plus the directed compatibility graph over them.
//!
//! # Architecture
//!
//! - **rng**: Deterministic uniform draws (the only source of randomness)
//! - **sampler**: Blood type, spousal status and PRA/CPRA draws
//! - **models**: Domain types (BloodType, Pair, Altruist, Pool)
//! - **generator**: Participant factory, population assembler, pipeline
//! - **matrix**: Compatibility matrix builder
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG); same seed, same pool
//! 2. Generated pools contain only incompatible pairs
//! 3. No self-loops, no altruist-to-altruist edges
//! 4. Blood type encodings are always one-hot in column order (O, A, AB, B)

// Module declarations
pub mod error;
pub mod generator;
pub mod matrix;
pub mod models;
pub mod rng;
pub mod sampler;

// Re-exports for convenience
pub use error::{check_cardinality, GeneratorError};
pub use generator::{
    generate_synthetic, get_pool_data_synthetic, AltruistCpraPolicy, GeneratorConfig, PoolData,
    PoolGenerator, SyntheticPopulation,
};
pub use matrix::{build_compatibility_matrix, EdgeMatrix};
pub use models::{
    Altruist, BloodType, BloodTypeEncoding, Pair, ParticipantError, ParticipantId, Pool,
};
pub use rng::{RngManager, UniformSource};
pub use sampler::{AttributeSampler, SaidmanParams, SaidmanSampler};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn saidman_pool_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::generator::generate_synthetic, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::generator::get_pool_data_synthetic, m)?)?;
    Ok(())
}
