//! ABO blood types and their one-hot encoding
//!
//! Two orderings exist for blood types and they must never be mixed up:
//! - draw order (O, A, B, AB): the order of the cumulative thresholds used
//!   when sampling a type
//! - encoding order (O, A, AB, B): the column order of encoded rows handed
//!   to the matrix builder and exported to callers
//!
//! [`BloodTypeEncoding`] is indexed by [`BloodType`] so callers never touch
//! raw column numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::participant::ParticipantError;

/// Number of columns in an encoded blood type row.
pub const ENCODING_WIDTH: usize = 4;

/// ABO blood type of a patient or donor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodType {
    O,
    A,
    B,
    AB,
}

impl BloodType {
    /// All blood types in draw order.
    pub const ALL: [BloodType; 4] = [BloodType::O, BloodType::A, BloodType::B, BloodType::AB];

    /// All blood types in encoding (column) order.
    pub const ENCODING_ORDER: [BloodType; ENCODING_WIDTH] =
        [BloodType::O, BloodType::A, BloodType::AB, BloodType::B];

    /// Column of this type in an encoded row.
    pub fn encoding_column(self) -> usize {
        match self {
            BloodType::O => 0,
            BloodType::A => 1,
            BloodType::AB => 2,
            BloodType::B => 3,
        }
    }

    /// Blood types a donor of this type may give to.
    pub fn compatible_recipients(self) -> &'static [BloodType] {
        match self {
            BloodType::O => &[BloodType::O, BloodType::A, BloodType::AB, BloodType::B],
            BloodType::A => &[BloodType::A, BloodType::AB],
            BloodType::B => &[BloodType::B, BloodType::AB],
            BloodType::AB => &[BloodType::AB],
        }
    }

    /// ABO rule: can a donor of this type give to `patient`?
    ///
    /// # Example
    /// ```
    /// use saidman_pool_core::BloodType;
    ///
    /// assert!(BloodType::O.can_donate_to(BloodType::AB));
    /// assert!(!BloodType::AB.can_donate_to(BloodType::O));
    /// ```
    pub fn can_donate_to(self, patient: BloodType) -> bool {
        self.compatible_recipients().contains(&patient)
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BloodType::O => "O",
            BloodType::A => "A",
            BloodType::B => "B",
            BloodType::AB => "AB",
        };
        f.write_str(name)
    }
}

/// One-hot encoded blood type, columns in encoding order (O, A, AB, B).
///
/// Always holds exactly one set column. Serializes as the raw row, e.g.
/// type AB is `[0, 0, 1, 0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; ENCODING_WIDTH]", into = "[u8; ENCODING_WIDTH]")]
pub struct BloodTypeEncoding {
    blood_type: BloodType,
}

impl BloodTypeEncoding {
    pub fn new(blood_type: BloodType) -> Self {
        Self { blood_type }
    }

    /// Validate a raw row, rejecting anything that is not exactly one-hot.
    pub fn try_from_row(row: [u8; ENCODING_WIDTH]) -> Result<Self, ParticipantError> {
        let set: Vec<usize> = row
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(|(col, _)| col)
            .collect();

        match (set.as_slice(), row.iter().all(|&v| v <= 1)) {
            ([col], true) => Ok(Self::new(BloodType::ENCODING_ORDER[*col])),
            _ => Err(ParticipantError::NotOneHot { row }),
        }
    }

    pub fn blood_type(&self) -> BloodType {
        self.blood_type
    }

    /// True when the column for `blood_type` is set.
    pub fn is(&self, blood_type: BloodType) -> bool {
        self.blood_type == blood_type
    }

    /// Value of the column belonging to `blood_type` (0 or 1).
    pub fn get(&self, blood_type: BloodType) -> u8 {
        u8::from(self.is(blood_type))
    }

    pub fn as_row(&self) -> [u8; ENCODING_WIDTH] {
        let mut row = [0u8; ENCODING_WIDTH];
        row[self.blood_type.encoding_column()] = 1;
        row
    }
}

impl From<BloodType> for BloodTypeEncoding {
    fn from(blood_type: BloodType) -> Self {
        Self::new(blood_type)
    }
}

impl TryFrom<[u8; ENCODING_WIDTH]> for BloodTypeEncoding {
    type Error = ParticipantError;

    fn try_from(row: [u8; ENCODING_WIDTH]) -> Result<Self, Self::Error> {
        Self::try_from_row(row)
    }
}

impl From<BloodTypeEncoding> for [u8; ENCODING_WIDTH] {
    fn from(encoding: BloodTypeEncoding) -> Self {
        encoding.as_row()
    }
}
