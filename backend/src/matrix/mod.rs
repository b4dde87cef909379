//! Compatibility matrix construction
//!
//! Turns an assembled population into the directed edge matrix consumed by
//! exchange-matching code, plus the edge-weight variant.
//!
//! # Conventions
//!
//! - Indices follow assembly order: pairs first, altruists last.
//! - `edges[patient, donor] = 1` means the donor of participant `donor`
//!   may give to the patient of participant `patient`.
//! - Altruists occupy a patient slot structurally, carrying their own donor
//!   type. Their rows are overridden after sampling, so nothing sampled for
//!   an altruist row reaches the output.
//!
//! # Steps
//!
//! 1. ABO block fill per donor group
//! 2. one uniform per cell, row-major; a cell survives when the draw
//!    exceeds the row patient's CPRA
//! 3. `edges = abo * survive * (1 - I)`
//! 4. `edge_weights = edges`
//! 5. with altruists: zero altruist rows of `edge_weights`; in `edges` zero
//!    the altruist × altruist block and set altruist rows × pair columns
//!    to 1 (dummy edges from every pair into every altruist)

mod edge_matrix;

pub use edge_matrix::EdgeMatrix;

use tracing::debug;

use crate::error::{matrix_side, GeneratorError};
use crate::models::{validate_cpra, BloodType, BloodTypeEncoding};
use crate::rng::UniformSource;

/// Build `(edges, edge_weights)` for a population.
///
/// `donor` and `patient` hold one encoding per participant (pairs then
/// altruists); `cpra` one rejection probability per participant.
///
/// # Errors
/// - [`GeneratorError::DimensionMismatch`] if an input's length is not
///   `num_pairs + num_altruists`
/// - [`GeneratorError::Participant`] if a CPRA is outside [0, 1]
/// - [`GeneratorError::InvalidCardinality`] if the matrix cannot be indexed
///
/// # Example
/// ```
/// use saidman_pool_core::matrix::build_compatibility_matrix;
/// use saidman_pool_core::{BloodType, BloodTypeEncoding, RngManager};
///
/// let enc = |bt| BloodTypeEncoding::new(bt);
/// let donor = [enc(BloodType::O), enc(BloodType::A)];
/// let patient = [enc(BloodType::A), enc(BloodType::O)];
/// let mut rng = RngManager::new(1);
///
/// let (edges, weights) =
///     build_compatibility_matrix(2, 0, &donor, &patient, &[0.0, 0.0], &mut rng).unwrap();
/// // A donor -> A patient, O donor -> O patient, no self-loops
/// assert_eq!(edges.to_nested(), vec![vec![0, 1], vec![1, 0]]);
/// assert_eq!(edges, weights);
/// ```
pub fn build_compatibility_matrix<R: UniformSource + ?Sized>(
    num_pairs: usize,
    num_altruists: usize,
    donor: &[BloodTypeEncoding],
    patient: &[BloodTypeEncoding],
    cpra: &[f64],
    source: &mut R,
) -> Result<(EdgeMatrix, EdgeMatrix), GeneratorError> {
    let n = matrix_side(num_pairs, num_altruists)?;
    check_len("donor encodings", donor.len(), n)?;
    check_len("patient encodings", patient.len(), n)?;
    check_len("cpra values", cpra.len(), n)?;
    for &value in cpra {
        validate_cpra(value)?;
    }

    let mut edges = abo_compatibility(donor, patient);
    let abo_edges = edges.count_edges();

    edges.mask_with(&crossmatch_survival(cpra, source));
    for i in 0..n {
        edges.set(i, i, 0);
    }

    let mut edge_weights = edges.clone();

    if num_altruists > 0 {
        let pairs = 0..num_pairs;
        let altruists = num_pairs..n;

        edge_weights.fill_block(altruists.clone(), 0..n, 0);
        edges.fill_block(altruists.clone(), altruists.clone(), 0);
        edges.fill_block(altruists, pairs, 1);
    }

    debug!(
        participants = n,
        abo_edges,
        edges = edges.count_edges(),
        weighted_edges = edge_weights.count_edges(),
        "Built compatibility matrix"
    );

    Ok((edges, edge_weights))
}

/// ABO block fill: for every donor group, every participant whose donor
/// has that type is connected to every participant whose patient type is
/// among the group's recipients.
fn abo_compatibility(donor: &[BloodTypeEncoding], patient: &[BloodTypeEncoding]) -> EdgeMatrix {
    let mut matrix = EdgeMatrix::zeros(donor.len());

    for donor_type in BloodType::ENCODING_ORDER {
        let recipients = donor_type.compatible_recipients();

        let donor_idx: Vec<usize> = indices_where(donor, |enc| enc.is(donor_type));
        let patient_idx: Vec<usize> =
            indices_where(patient, |enc| recipients.contains(&enc.blood_type()));

        for &p in &patient_idx {
            for &d in &donor_idx {
                matrix.set(p, d, 1);
            }
        }
    }

    matrix
}

/// 1 where a fresh uniform draw exceeds the row's CPRA.
fn crossmatch_survival<R: UniformSource + ?Sized>(cpra: &[f64], source: &mut R) -> EdgeMatrix {
    let n = cpra.len();
    let mut mask = EdgeMatrix::zeros(n);
    for (row, &threshold) in cpra.iter().enumerate() {
        for col in 0..n {
            if source.next_uniform() > threshold {
                mask.set(row, col, 1);
            }
        }
    }
    mask
}

fn indices_where<F>(encodings: &[BloodTypeEncoding], predicate: F) -> Vec<usize>
where
    F: Fn(&BloodTypeEncoding) -> bool,
{
    encodings
        .iter()
        .enumerate()
        .filter(|(_, enc)| predicate(enc))
        .map(|(idx, _)| idx)
        .collect()
}

fn check_len(input: &'static str, actual: usize, expected: usize) -> Result<(), GeneratorError> {
    if actual == expected {
        Ok(())
    } else {
        Err(GeneratorError::DimensionMismatch {
            input,
            expected,
            actual,
        })
    }
}
