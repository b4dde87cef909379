//! Results of a generation run

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::GeneratorError;
use crate::matrix::EdgeMatrix;
use crate::models::{BloodTypeEncoding, Pool, ENCODING_WIDTH};

/// Output of population assembly (no matrix yet).
///
/// Encodings are one per participant of the matching role: `donor_encodings`
/// and `patient_encodings` have one row per pair, `altruist_encodings` one
/// row per altruist. `cpra` covers pairs then altruists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticPopulation {
    pub pool: Pool,
    pub donor_encodings: Vec<BloodTypeEncoding>,
    pub patient_encodings: Vec<BloodTypeEncoding>,
    pub altruist_encodings: Vec<BloodTypeEncoding>,
    pub cpra: Vec<f64>,
}

/// Output of the full pipeline: population plus compatibility matrices.
///
/// `donor_encodings` and `patient_encodings` cover the whole population;
/// altruist slots carry the altruist's donor type in both.
/// `pool` has its edge list filled from `edges`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolData {
    pub pool: Pool,
    pub edges: EdgeMatrix,
    pub edge_weights: EdgeMatrix,
    pub donor_encodings: Vec<BloodTypeEncoding>,
    pub patient_encodings: Vec<BloodTypeEncoding>,
    pub cpra: Vec<f64>,
}

impl PoolData {
    pub fn num_participants(&self) -> usize {
        self.edges.size()
    }

    /// SHA-256 of the canonical JSON form, as lowercase hex.
    ///
    /// Identical runs give identical digests.
    pub fn digest(&self) -> Result<String, GeneratorError> {
        let json = serde_json::to_string(self)
            .map_err(|e| GeneratorError::Serialization(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        let result = hasher.finalize();

        Ok(format!("{:x}", result))
    }
}

/// Raw rows of a sequence of encodings, for export.
pub fn encoding_rows(encodings: &[BloodTypeEncoding]) -> Vec<[u8; ENCODING_WIDTH]> {
    encodings.iter().map(BloodTypeEncoding::as_row).collect()
}
