//! Pool participants
//!
//! A participant is either a patient-donor [`Pair`] or an [`Altruist`]
//! (non-directed donor). Both are immutable once built; IDs come from the
//! generator's counter and share one space.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::blood_type::{BloodType, ENCODING_WIDTH};

/// Participant ID. Dense, pairs first, altruists after.
pub type ParticipantId = usize;

/// Data-integrity errors raised while building participants or encodings
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParticipantError {
    #[error("CPRA {value} is outside [0, 1]")]
    CpraOutOfRange { value: f64 },

    #[error("Blood type encoding {row:?} is not one-hot")]
    NotOneHot { row: [u8; ENCODING_WIDTH] },
}

/// Check that a CPRA is a finite probability.
pub fn validate_cpra(value: f64) -> Result<f64, ParticipantError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ParticipantError::CpraOutOfRange { value })
    }
}

/// A patient together with their willing (but not necessarily compatible) donor
///
/// # Example
/// ```
/// use saidman_pool_core::{BloodType, Pair};
///
/// let pair = Pair::new(0, BloodType::O, BloodType::A, false, 0.05, false).unwrap();
/// assert_eq!(pair.patient_blood_type(), BloodType::O);
/// assert!(!pair.is_compatible());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    id: ParticipantId,
    patient_blood_type: BloodType,
    donor_blood_type: BloodType,

    /// Female patient whose donor is her spouse.
    spousal_donor: bool,

    /// Probability of a positive crossmatch against a random donor.
    patient_cpra: f64,

    /// Own donor is ABO-compatible and crossmatched negative.
    compatible: bool,
}

impl Pair {
    pub fn new(
        id: ParticipantId,
        patient_blood_type: BloodType,
        donor_blood_type: BloodType,
        spousal_donor: bool,
        patient_cpra: f64,
        compatible: bool,
    ) -> Result<Self, ParticipantError> {
        Ok(Self {
            id,
            patient_blood_type,
            donor_blood_type,
            spousal_donor,
            patient_cpra: validate_cpra(patient_cpra)?,
            compatible,
        })
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn patient_blood_type(&self) -> BloodType {
        self.patient_blood_type
    }

    pub fn donor_blood_type(&self) -> BloodType {
        self.donor_blood_type
    }

    pub fn is_spousal_donor(&self) -> bool {
        self.spousal_donor
    }

    pub fn patient_cpra(&self) -> f64 {
        self.patient_cpra
    }

    pub fn is_compatible(&self) -> bool {
        self.compatible
    }
}

/// Non-directed donor: can give into the pool, never receives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Altruist {
    id: ParticipantId,
    donor_blood_type: BloodType,
}

impl Altruist {
    pub fn new(id: ParticipantId, donor_blood_type: BloodType) -> Self {
        Self {
            id,
            donor_blood_type,
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn donor_blood_type(&self) -> BloodType {
        self.donor_blood_type
    }
}
