//! Errors surfaced by pool generation and matrix construction
//!
//! All of these are local construction failures. No partial pool is ever
//! returned alongside an error.

use thiserror::Error;

use crate::models::ParticipantError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeneratorError {
    /// Negative count, or a population too large to index as a square matrix
    #[error("Invalid cardinality for {field}: {value}")]
    InvalidCardinality { field: &'static str, value: i128 },

    /// A sampling probability or limit that cannot be used
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Pair rejection sampling ran out of attempts
    #[error(
        "Pair generation exhausted after {attempts} attempts: \
         accepted {accepted} of {requested} incompatible pairs"
    )]
    GenerationExhausted {
        attempts: usize,
        accepted: usize,
        requested: usize,
    },

    /// Matrix builder inputs disagree on the population size
    #[error("{input} has length {actual}, expected {expected}")]
    DimensionMismatch {
        input: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Participant(#[from] ParticipantError),
}

/// Convert a signed count (e.g. from Python) into a population size.
///
/// # Example
/// ```
/// use saidman_pool_core::{check_cardinality, GeneratorError};
///
/// assert_eq!(check_cardinality("num_pairs", 3), Ok(3));
/// assert!(matches!(
///     check_cardinality("num_pairs", -1),
///     Err(GeneratorError::InvalidCardinality { .. })
/// ));
/// ```
pub fn check_cardinality(field: &'static str, value: i64) -> Result<usize, GeneratorError> {
    usize::try_from(value).map_err(|_| GeneratorError::InvalidCardinality {
        field,
        value: i128::from(value),
    })
}

/// Side length of the edge matrix for `num_pairs + num_altruists`
/// participants, rejecting sizes whose cell count overflows `usize`.
pub fn matrix_side(num_pairs: usize, num_altruists: usize) -> Result<usize, GeneratorError> {
    let overflow = |field, value: usize| GeneratorError::InvalidCardinality {
        field,
        value: value as i128,
    };
    let side = num_pairs
        .checked_add(num_altruists)
        .ok_or_else(|| overflow("num_pairs + num_altruists", num_pairs))?;
    side.checked_mul(side)
        .ok_or_else(|| overflow("num_pairs + num_altruists", side))?;
    Ok(side)
}
