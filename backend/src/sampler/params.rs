//! Saidman model probabilities

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// Probabilities driving the attribute sampler.
///
/// `Default` gives the validated constants of the published model.
/// Blood-type probabilities are given for O, A and B; AB takes the
/// remainder.
///
/// # Example
/// ```
/// use saidman_pool_core::sampler::SaidmanParams;
///
/// let params: SaidmanParams = serde_json::from_str(r#"{"pr_female": 0.5}"#).unwrap();
/// assert_eq!(params.pr_female, 0.5);
/// assert_eq!(params.pr_low_pra, 0.7019);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaidmanParams {
    pub pr_female: f64,
    pub pr_spousal_donor: f64,

    /// PRA tier probabilities; high takes the remainder.
    pub pr_low_pra: f64,
    pub pr_med_pra: f64,

    /// Crossmatch-rejection probability per PRA tier.
    pub pr_low_pra_incompatibility: f64,
    pub pr_med_pra_incompatibility: f64,
    pub pr_high_pra_incompatibility: f64,

    pub pr_spousal_pra_compatibility: f64,

    pub pr_patient_type_o: f64,
    pub pr_patient_type_a: f64,
    pub pr_patient_type_b: f64,

    pub pr_donor_type_o: f64,
    pub pr_donor_type_a: f64,
    pub pr_donor_type_b: f64,
}

impl Default for SaidmanParams {
    fn default() -> Self {
        Self {
            pr_female: 0.4090,
            pr_spousal_donor: 0.4897,
            pr_low_pra: 0.7019,
            pr_med_pra: 0.2,
            pr_low_pra_incompatibility: 0.05,
            pr_med_pra_incompatibility: 0.45,
            pr_high_pra_incompatibility: 0.90,
            pr_spousal_pra_compatibility: 0.75,
            pr_patient_type_o: 0.4814,
            pr_patient_type_a: 0.3373,
            pr_patient_type_b: 0.1428,
            pr_donor_type_o: 0.4814,
            pr_donor_type_a: 0.3373,
            pr_donor_type_b: 0.1428,
        }
    }
}

impl SaidmanParams {
    /// Cumulative thresholds (O, O+A, O+A+B) for patient blood type.
    pub fn patient_blood_type_thresholds(&self) -> [f64; 3] {
        cumulative(
            self.pr_patient_type_o,
            self.pr_patient_type_a,
            self.pr_patient_type_b,
        )
    }

    /// Cumulative thresholds (O, O+A, O+A+B) for donor blood type.
    pub fn donor_blood_type_thresholds(&self) -> [f64; 3] {
        cumulative(
            self.pr_donor_type_o,
            self.pr_donor_type_a,
            self.pr_donor_type_b,
        )
    }

    /// Reject probabilities outside [0, 1] and distributions whose
    /// explicit parts already exceed 1.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let probabilities = [
            ("pr_female", self.pr_female),
            ("pr_spousal_donor", self.pr_spousal_donor),
            ("pr_low_pra", self.pr_low_pra),
            ("pr_med_pra", self.pr_med_pra),
            ("pr_low_pra_incompatibility", self.pr_low_pra_incompatibility),
            ("pr_med_pra_incompatibility", self.pr_med_pra_incompatibility),
            ("pr_high_pra_incompatibility", self.pr_high_pra_incompatibility),
            ("pr_spousal_pra_compatibility", self.pr_spousal_pra_compatibility),
            ("pr_patient_type_o", self.pr_patient_type_o),
            ("pr_patient_type_a", self.pr_patient_type_a),
            ("pr_patient_type_b", self.pr_patient_type_b),
            ("pr_donor_type_o", self.pr_donor_type_o),
            ("pr_donor_type_a", self.pr_donor_type_a),
            ("pr_donor_type_b", self.pr_donor_type_b),
        ];

        for (name, value) in probabilities {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(GeneratorError::InvalidParameter {
                    name,
                    reason: format!("{} is not a probability", value),
                });
            }
        }

        let totals = [
            ("pr_low_pra + pr_med_pra", self.pr_low_pra + self.pr_med_pra),
            ("patient blood type", self.patient_blood_type_thresholds()[2]),
            ("donor blood type", self.donor_blood_type_thresholds()[2]),
        ];

        // Small slack for decimal constants that sum to exactly 1 on paper
        for (name, total) in totals {
            if total > 1.0 + 1e-9 {
                return Err(GeneratorError::InvalidParameter {
                    name,
                    reason: format!("probabilities sum to {} (> 1)", total),
                });
            }
        }

        Ok(())
    }
}

fn cumulative(o: f64, a: f64, b: f64) -> [f64; 3] {
    [o, o + a, o + a + b]
}
