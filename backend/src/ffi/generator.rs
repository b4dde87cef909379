//! PyO3 wrappers for pool generation
//!
//! # Example (from Python)
//!
//! ```python
//! from saidman_pool_core import get_pool_data_synthetic
//!
//! edges, edge_weights, donor, patient, cpra = get_pool_data_synthetic(10, 2, seed=7)
//! assert len(edges) == 12
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::{check_cardinality, GeneratorError};
use crate::generator::{encoding_rows, GeneratorConfig, DEFAULT_SEED};
use crate::models::ENCODING_WIDTH;

type Rows = Vec<[u8; ENCODING_WIDTH]>;

/// Invalid counts become `ValueError`, everything else `RuntimeError`.
fn to_py_err(err: GeneratorError) -> PyErr {
    match err {
        GeneratorError::InvalidCardinality { .. } | GeneratorError::InvalidParameter { .. } => {
            PyValueError::new_err(err.to_string())
        }
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

fn config_from_args(num_pairs: i64, num_altruists: i64, seed: u64) -> PyResult<GeneratorConfig> {
    let num_pairs = check_cardinality("num_pairs", num_pairs).map_err(to_py_err)?;
    let num_altruists = check_cardinality("num_altruists", num_altruists).map_err(to_py_err)?;
    Ok(GeneratorConfig::new(num_pairs, num_altruists).with_seed(seed))
}

/// Assemble a population.
///
/// Returns `(pool_json, donor, patient, altruists, cpra)` where the
/// encodings are lists of one-hot rows in column order (O, A, AB, B) and
/// `pool_json` is the pool serialized as JSON.
#[pyfunction]
#[pyo3(signature = (num_pairs, num_altruists, seed = DEFAULT_SEED))]
pub fn generate_synthetic(
    num_pairs: i64,
    num_altruists: i64,
    seed: u64,
) -> PyResult<(String, Rows, Rows, Rows, Vec<f64>)> {
    let config = config_from_args(num_pairs, num_altruists, seed)?;
    let population = crate::generator::generate_synthetic(&config).map_err(to_py_err)?;

    let pool_json = serde_json::to_string(&population.pool)
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;

    Ok((
        pool_json,
        encoding_rows(&population.donor_encodings),
        encoding_rows(&population.patient_encodings),
        encoding_rows(&population.altruist_encodings),
        population.cpra,
    ))
}

/// Full pipeline.
///
/// Returns `(edges, edge_weights, donor, patient, cpra)`; matrices are
/// nested lists indexed `[patient][donor]`.
#[pyfunction]
#[pyo3(signature = (num_pairs, num_altruists, seed = DEFAULT_SEED))]
pub fn get_pool_data_synthetic(
    num_pairs: i64,
    num_altruists: i64,
    seed: u64,
) -> PyResult<(Vec<Vec<u8>>, Vec<Vec<u8>>, Rows, Rows, Vec<f64>)> {
    let config = config_from_args(num_pairs, num_altruists, seed)?;
    let data = crate::generator::get_pool_data_synthetic(&config).map_err(to_py_err)?;

    Ok((
        data.edges.to_nested(),
        data.edge_weights.to_nested(),
        encoding_rows(&data.donor_encodings),
        encoding_rows(&data.patient_encodings),
        data.cpra,
    ))
}
